use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::oneshot;

use monitdir::engine::Sleeper;

type Step = Box<dyn FnOnce() + Send>;

/// A sleeper that drives a scripted scenario instead of waiting.
///
/// Every call to `sleep` records the requested duration and runs the next
/// scripted step (typically a mutation of a `MockFileSystem` or a temp
/// directory), then returns immediately. Once the script is exhausted the
/// next `sleep` fires the shutdown signal and never completes, so the
/// runtime exits cleanly.
pub struct ScriptedSleeper {
    steps: VecDeque<Step>,
    slept: Arc<Mutex<Vec<Duration>>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl ScriptedSleeper {
    /// Returns the sleeper and the receiver to pass to
    /// `Runtime::with_shutdown`.
    pub fn new() -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        let sleeper = Self {
            steps: VecDeque::new(),
            slept: Arc::new(Mutex::new(Vec::new())),
            shutdown: Some(tx),
        };
        (sleeper, rx)
    }

    /// Append a step run at the next wait.
    pub fn then(mut self, step: impl FnOnce() + Send + 'static) -> Self {
        self.steps.push_back(Box::new(step));
        self
    }

    /// Append `n` waits during which nothing changes.
    pub fn idle(mut self, n: usize) -> Self {
        for _ in 0..n {
            self.steps.push_back(Box::new(|| {}));
        }
        self
    }

    /// Shared handle to the durations requested so far.
    pub fn slept(&self) -> Arc<Mutex<Vec<Duration>>> {
        Arc::clone(&self.slept)
    }
}

impl Sleeper for ScriptedSleeper {
    fn sleep(&mut self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        self.slept.lock().unwrap().push(duration);

        match self.steps.pop_front() {
            Some(step) => {
                step();
                Box::pin(async {})
            }
            None => {
                if let Some(tx) = self.shutdown.take() {
                    let _ = tx.send(());
                }
                Box::pin(std::future::pending())
            }
        }
    }
}
