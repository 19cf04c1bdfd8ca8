//! CLI argument definitions for `metaext`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "metaext",
    version,
    about = "Extend and validate study sample metadata against a layered schema",
    long_about = "Extend and validate study sample metadata against a layered schema.\n\n\
                  Fills defaults and required placeholders per host type and sample type,\n\
                  tags rows that cannot be resolved, and reports every rule violation."
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

    /// Allow sample names and cell values in trace-level logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extend and validate a metadata file, writing the extended table and reports.
    Extend(ExtendArgs),

    /// List the flattened host types with their sample types.
    Hosts(SchemaArgs),

    /// Print the effective schema of one host type and sample type as JSON.
    Schema(ShowSchemaArgs),
}

/// Schema document locations shared by every subcommand.
#[derive(Args)]
pub struct SchemaArgs {
    /// Standards YAML document.
    #[arg(long = "standards", value_name = "YAML")]
    pub standards: PathBuf,

    /// Study-specific YAML overlay.
    #[arg(long = "study", value_name = "YAML")]
    pub study: Option<PathBuf>,
}

#[derive(Args)]
pub struct ExtendArgs {
    /// Metadata file (.csv, .tsv or .txt).
    #[arg(value_name = "METADATA")]
    pub metadata: PathBuf,

    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Output directory (default: the directory of METADATA).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Base name of the output files (default: <METADATA stem>_extended).
    #[arg(long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Extend and validate without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Exit with status 1 when any validation error is reported.
    #[arg(long = "fail-on-violations")]
    pub fail_on_violations: bool,

    /// Write the failures file even when every row resolved.
    #[arg(long = "write-empty-fails")]
    pub write_empty_fails: bool,
}

#[derive(Args)]
pub struct ShowSchemaArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Host type shorthand.
    #[arg(value_name = "HOST")]
    pub host: String,

    /// Sample type shorthand.
    #[arg(value_name = "SAMPLE_TYPE")]
    pub sample_type: String,
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
