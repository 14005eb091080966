// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `relkit`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "relkit",
    version,
    about = "Release-management tasks and dependency wiring for app builds.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Relkit.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Relkit.toml", global = true)]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `RELKIT_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Build property, as `name` or `name=value` (e.g. `-P ignoreChecks`).
    ///
    /// Overrides the same key from the `[properties]` table.
    #[arg(short = 'P', value_name = "KEY[=VALUE]", global = true)]
    pub properties: Vec<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every registered task with its dependency and ordering edges.
    Tasks,

    /// Execute the named tasks' own actions, in the given order.
    ///
    /// Dependencies are *not* resolved; ordering is the host's job.
    Run {
        #[arg(required = true, value_name = "TASK")]
        tasks: Vec<String>,
    },

    /// Print the output file name computed for every configured variant.
    Outputs,

    /// Print the version name from the version file and the version code.
    Version,
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
