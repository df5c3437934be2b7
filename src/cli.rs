// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{CommandFactory, Parser, ValueEnum};

use crate::types::DirErrorPolicy;

/// Command-line arguments for `monitdir`.
///
/// Every monitoring option is optional here so that values from a
/// `--config` file can fill the gaps; defaults are applied when the two
/// sources are merged (see [`crate::config::RawMonitorConfig`]).
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "monitdir",
    version,
    about = "Monitor a directory for file additions/removals and print them or run a command.",
    long_about = None,
    after_help = "Example:\n  monitdir -d ~/Downloads -i 10 -r"
)]
pub struct CliArgs {
    /// Directory to monitor (required, here or in the config file).
    #[arg(short, long, value_name = "DIR")]
    pub directory: Option<String>,

    /// Monitor subdirectories too.
    #[arg(short, long)]
    pub recursive: bool,

    /// Time between polls, in seconds (default: 5).
    #[arg(short, long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Command to execute when the directory changes (default: print changes).
    #[arg(short = 'e', long = "execute", value_name = "CMD")]
    pub execute: Option<String>,

    /// Run the command once per changed file, passing the file path.
    #[arg(short, long)]
    pub pass_filename: bool,

    /// Optional TOML config file with a `[monitor]` table.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<String>,

    /// Give up waiting for the directory size to settle after this many
    /// one-second samples and act anyway (default: wait forever).
    #[arg(long, value_name = "N")]
    pub max_stabilize_samples: Option<u32>,

    /// What to do when the directory cannot be read during a poll.
    #[arg(long, value_enum, value_name = "POLICY")]
    pub on_dir_error: Option<DirErrorPolicy>,

    /// Wait for each spawned command to exit before continuing.
    #[arg(long)]
    pub wait: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MONITDIR_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

/// Render the usage/help text shown when the configuration is rejected.
pub fn usage() -> String {
    CliArgs::command().render_help().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_flags_match_original_tool() {
        let args = CliArgs::try_parse_from([
            "monitdir", "-d", "/tmp", "-r", "-i", "10", "-e", "notify", "-p",
        ])
        .unwrap();

        assert_eq!(args.directory.as_deref(), Some("/tmp"));
        assert!(args.recursive);
        assert_eq!(args.interval, Some(10));
        assert_eq!(args.execute.as_deref(), Some("notify"));
        assert!(args.pass_filename);
    }

    #[test]
    fn dir_error_policy_flag_parses_by_name() {
        let args = CliArgs::try_parse_from(["monitdir", "--on-dir-error", "skip"]).unwrap();
        assert_eq!(args.on_dir_error, Some(DirErrorPolicy::Skip));

        assert!(CliArgs::try_parse_from(["monitdir", "--on-dir-error", "retry"]).is_err());
    }

    #[test]
    fn usage_mentions_directory_flag() {
        assert!(usage().contains("--directory"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }
}
