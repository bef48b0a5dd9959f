//! CLI argument definitions for the address standardizer.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use addr_normalize::DEFAULT_OUTPUT_COLUMN;
use addr_rewrite::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};

#[derive(Parser)]
#[command(
    name = "addr-std",
    version,
    about = "Address standardizer - abbreviate place designators in address tables",
    long_about = "Standardize the address column of a delimited table.\n\n\
                  Place designators (Calle, Carrera, Edificio, ...) are replaced by their\n\
                  official abbreviations; an optional pass sends each address to an\n\
                  Ollama-compatible model and keeps the input when the call fails."
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

    /// Allow address values in trace output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply the abbreviation rules into a new column.
    Standardize(StandardizeArgs),

    /// Rewrite addresses with the generative model into a new column.
    Rewrite(RewriteArgs),

    /// Apply the abbreviation rules in place, filling missing cells.
    Preprocess(PreprocessArgs),

    /// Print the active rule set.
    Rules(RulesArgs),
}

#[derive(Args)]
pub struct TableArgs {
    /// Delimited input file with a header row.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Path of the file to write.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Column to standardize (default: first column whose name contains "address").
    #[arg(long = "column", value_name = "NAME")]
    pub column: Option<String>,

    /// Field delimiter.
    #[arg(long = "delimiter", value_name = "CHAR", default_value_t = ',')]
    pub delimiter: char,

    /// Disable progress bars.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

#[derive(Args)]
pub struct RulesFileArgs {
    /// TOML rule file replacing the built-in catalog.
    #[arg(long = "rules", value_name = "FILE")]
    pub rules: Option<PathBuf>,
}

#[derive(Args)]
pub struct ServiceArgs {
    /// Base URL of the Ollama server.
    #[arg(long = "endpoint", value_name = "URL", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Model identifier.
    #[arg(long = "model", value_name = "NAME", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Prompt template containing an {address} placeholder.
    #[arg(long = "prompt-template", value_name = "TEXT")]
    pub prompt_template: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long = "timeout-secs", value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

#[derive(Args)]
pub struct StandardizeArgs {
    #[command(flatten)]
    pub table: TableArgs,

    #[command(flatten)]
    pub rules: RulesFileArgs,

    /// Name of the derived column.
    #[arg(long = "output-column", value_name = "NAME", default_value = DEFAULT_OUTPUT_COLUMN)]
    pub output_column: String,

    /// Pass the rule output through the generative model.
    #[arg(long = "rewrite")]
    pub rewrite: bool,

    #[command(flatten)]
    pub service: ServiceArgs,
}

#[derive(Args)]
pub struct RewriteArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Name of the derived column.
    #[arg(long = "output-column", value_name = "NAME", default_value = DEFAULT_OUTPUT_COLUMN)]
    pub output_column: String,

    #[command(flatten)]
    pub service: ServiceArgs,
}

#[derive(Args)]
pub struct PreprocessArgs {
    #[command(flatten)]
    pub table: TableArgs,

    #[command(flatten)]
    pub rules: RulesFileArgs,
}

#[derive(Args)]
pub struct RulesArgs {
    #[command(flatten)]
    pub rules: RulesFileArgs,
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
