// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `buildag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "buildag",
    version,
    about = "Sequence and run build tasks across projects with declared dependencies.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the build description (TOML).
    ///
    /// Default: `Buildag.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Buildag.toml")]
    pub config: String,

    /// Maximum number of tasks to run concurrently.
    ///
    /// Overrides `[settings].workers`. With 1 worker the task start order is
    /// fully deterministic.
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Stop dispatching new tasks after the first failure.
    ///
    /// Tasks already running are allowed to finish; everything not yet
    /// started is marked skipped.
    #[arg(long)]
    pub fail_fast: bool,

    /// Parse + validate, print projects and the task graph, but don't
    /// execute any commands.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `BUILDAG_LOG` or a default level will be used.
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
