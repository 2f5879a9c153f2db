// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `devloop`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "devloop",
    version,
    about = "Watch a source tree and decide, per resource, between a full rebuild and a live update.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    #[arg(long, value_name = "PATH", default_value = "Devloop.toml")]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DEVLOOP_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print resources and their rules, then exit.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the decisions a change to these paths would produce, then exit.
    #[arg(long, value_name = "PATH", num_args = 1..)]
    pub explain: Vec<PathBuf>,

    /// Print a resource's ignore rules as glob patterns, then exit.
    #[arg(long, value_name = "RESOURCE", conflicts_with = "write_ignore")]
    pub print_ignore: Option<String>,

    /// Write a resource's ignore rules to `.dockerignore` in its build
    /// context, then exit.
    #[arg(long, value_name = "RESOURCE")]
    pub write_ignore: Option<String>,
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
