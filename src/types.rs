use clap::ValueEnum;
use serde::Deserialize;

/// What to do when the watched directory cannot be read during a poll.
///
/// - `Fatal`: propagate the error and stop monitoring (default).
/// - `Skip`: log a warning, skip the cycle and keep the previous baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DirErrorPolicy {
    Fatal,
    Skip,
}

impl Default for DirErrorPolicy {
    fn default() -> Self {
        DirErrorPolicy::Fatal
    }
}

/// Literal action value that selects reporting mode.
pub const PRINT_ACTION: &str = "print";

/// The action taken once a change set has stabilized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print `new file:` / `file removed:` lines to stdout.
    Print,
    /// Run an external command.
    Execute {
        command: String,
        /// Run the command once per changed file, passing its path.
        pass_filename: bool,
    },
}
