//! CLI argument definitions for the Lastpass importer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use ep_crypto::DEFAULT_ITERATIONS;

#[derive(Parser)]
#[command(
    name = "ep-import",
    version,
    about = "Import a Lastpass CSV export into Easy Passwords",
    long_about = "Import a Lastpass CSV export into Easy Passwords.\n\n\
                  Passwords and notes are encrypted with the master password and\n\
                  written as an Easy Passwords backup (JSON) ready to be restored."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow domains to appear in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Prefix log lines with timestamps.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a Lastpass export and write an Easy Passwords backup.
    Import(ImportArgs),

    /// Check whether a file is a Lastpass CSV export.
    Detect(DetectArgs),
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Path to the Lastpass CSV export (already HTML-entity decoded).
    #[arg(value_name = "EXPORT")]
    pub export: PathBuf,

    /// Write the backup to this file instead of stdout.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write compact JSON instead of pretty-printed JSON.
    #[arg(long = "compact")]
    pub compact: bool,

    /// Master password used to encrypt imported secrets.
    #[arg(
        long = "master-password",
        env = "EASYPASSWORDS_MASTER_PASSWORD",
        hide_env_values = true
    )]
    pub master_password: Option<String>,

    /// PBKDF2 iterations for key derivation.
    #[arg(
        long = "iterations",
        env = "EASYPASSWORDS_PBKDF2_ITERATIONS",
        default_value_t = DEFAULT_ITERATIONS
    )]
    pub iterations: u32,

    /// Skip the per-domain summary table.
    #[arg(long = "no-summary")]
    pub no_summary: bool,

    /// Do not show the encryption progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

#[derive(Parser)]
pub struct DetectArgs {
    /// Path to the file to check.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
