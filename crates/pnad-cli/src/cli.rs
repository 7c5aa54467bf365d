//! CLI argument definitions for the PNAD pipeline.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "pnad",
    version,
    about = "PNAD Contínua pipeline - label, filter and aggregate survey data",
    long_about = "Label, filter and aggregate IBGE PNAD Contínua data.\n\n\
                  Workflows read settings from a TOML file (--config, or pnad.toml\n\
                  in the working directory when present). Flags override the file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: ./pnad.toml when it exists).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

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
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch NEET youth counts from SIDRA and summarize by year, sex and race.
    Neet(NeetArgs),

    /// Attach labels to a pre-renamed extract.
    Label(LabelArgs),

    /// Build an age-band extract from raw microdata files.
    Extract(ExtractArgs),

    /// List the code dictionaries, or the codes of one dictionary.
    Dictionaries(DictionariesArgs),

    /// Print the effective configuration as TOML.
    Config,
}

#[derive(Args, Default)]
pub struct NeetArgs {
    /// SIDRA period expression (e.g. 2022-2024, last 4).
    #[arg(long = "period")]
    pub period: Option<String>,

    /// Factor applied to published values.
    #[arg(long = "scale")]
    pub scale: Option<f64>,

    /// SIDRA API base URL.
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Summary CSV to write.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Default)]
pub struct LabelArgs {
    /// Extract with pre-renamed code columns.
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Labeled CSV to write.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write a `<measure>_suppressed` column after each measure.
    #[arg(long = "suppression-flags")]
    pub suppression_flags: bool,
}

#[derive(Args, Default)]
pub struct ExtractArgs {
    /// Raw microdata files, concatenated in the given order.
    #[arg(value_name = "INPUTS")]
    pub inputs: Vec<PathBuf>,

    /// Extract CSV to write.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Youngest age kept (inclusive).
    #[arg(long = "age-min")]
    pub age_min: Option<i64>,

    /// Oldest age kept (inclusive).
    #[arg(long = "age-max")]
    pub age_max: Option<i64>,

    /// Write a `<measure>_suppressed` column after each measure.
    #[arg(long = "suppression-flags")]
    pub suppression_flags: bool,
}

#[derive(Args, Default)]
pub struct DictionariesArgs {
    /// Dictionary name (e.g. race, uf); omit to list all dictionaries.
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
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
