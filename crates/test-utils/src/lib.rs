//! Shared fixtures for the monitdir integration tests: a recording command
//! runner, a sleeper that plays back filesystem mutations instead of
//! waiting, and config/output builders.

pub mod builders;
pub mod fake_runner;
pub mod scripted;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

/// Upper bound for a whole scripted monitor run.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

static INIT: Once = Once::new();

/// Route monitor logs into the per-test capture buffer.
///
/// Filtering follows `RUST_LOG`; without it only `monitdir` info lines and
/// warnings from everything else are kept. Output shows up for failing
/// tests, or for all of them with `--nocapture`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,monitdir=info"));

        fmt().with_env_filter(filter).with_test_writer().init();
    });
}

/// Await `f`, panicking if it outlives [`TEST_TIMEOUT`]. A scripted sleeper
/// that never fires shutdown would otherwise hang the suite.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(TEST_TIMEOUT, f).await {
        Ok(out) => out,
        Err(_) => panic!("monitor run did not finish within {TEST_TIMEOUT:?}"),
    }
}
