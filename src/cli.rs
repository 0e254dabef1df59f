// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_config_path;

/// Command-line arguments for `hashwatch`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hashwatch",
    version,
    about = "Report appearing, disappearing and changing URL hash parameters.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// File holding the current location; overrides `[config].location`.
    ///
    /// Without either, locations are read from stdin, one per line.
    #[arg(long, value_name = "PATH")]
    pub location: Option<PathBuf>,

    /// Evaluate the current location once and exit, no watching.
    #[arg(long)]
    pub once: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `HASHWATCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the watches, but don't read any location.
    #[arg(long)]
    pub dry_run: bool,
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

    #[test]
    fn defaults_and_overrides() {
        let args = CliArgs::try_parse_from(["hashwatch"]).unwrap();
        assert_eq!(args.config, PathBuf::from("Hashwatch.toml"));
        assert!(args.location.is_none());
        assert!(!args.once);

        let args = CliArgs::try_parse_from([
            "hashwatch",
            "--config",
            "w.toml",
            "--location",
            "loc.txt",
            "--once",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.location, Some(PathBuf::from("loc.txt")));
        assert!(args.once);
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
    }
}
