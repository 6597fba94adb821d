// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};

use crate::analytics::DEFAULT_CHART_LIMIT;
use crate::config::loader::default_task_file_path;

/// Command-line arguments for `qwix`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "qwix",
    version,
    about = "Order personal tasks by dependencies, priority and deadlines.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the task file (TOML).
    ///
    /// Default: `Qwix.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value_os_t = default_task_file_path())]
    pub file: PathBuf,

    /// Evaluate deadlines at this instant instead of the current time.
    #[arg(long, value_name = "RFC3339")]
    pub now: Option<DateTime<Utc>>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `QWIX_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the recommended work sequence.
    Order,
    /// Print the single task to work on next.
    Next,
    /// List incomplete tasks whose dependencies are all completed.
    Ready,
    /// List dependency links as `prerequisite -> dependent`.
    Links,
    /// Show activation values of incomplete tasks, highest first.
    Activation {
        #[arg(long, default_value_t = DEFAULT_CHART_LIMIT)]
        limit: usize,
    },
    /// Summarise the atom space built from the task file.
    Atoms,
    /// Print task statistics.
    Stats,
    /// Find a chain of dependency links connecting two tasks.
    Path {
        from: String,
        to: String,
    },
    /// Validate the task file and report dependency cycles.
    Check,
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_global_flags_and_subcommand() {
        let args = CliArgs::try_parse_from([
            "qwix",
            "--file",
            "tasks.toml",
            "--now",
            "2026-10-16T09:00:00Z",
            "activation",
            "--limit",
            "3",
        ])
        .unwrap();

        assert_eq!(args.file, PathBuf::from("tasks.toml"));
        assert_eq!(
            args.now,
            Some(Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap())
        );
        assert!(matches!(args.command, Command::Activation { limit: 3 }));
    }

    #[test]
    fn defaults_file_and_requires_a_command() {
        let args = CliArgs::try_parse_from(["qwix", "next"]).unwrap();
        assert_eq!(args.file, default_task_file_path());
        assert_eq!(args.file, PathBuf::from("Qwix.toml"));
        assert!(args.now.is_none());

        assert!(CliArgs::try_parse_from(["qwix"]).is_err());
    }

    #[test]
    fn path_takes_two_ids() {
        let args = CliArgs::try_parse_from(["qwix", "path", "a", "b"]).unwrap();
        match args.command {
            Command::Path { from, to } => assert_eq!((from.as_str(), to.as_str()), ("a", "b")),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
