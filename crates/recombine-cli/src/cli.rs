//! CLI argument definitions for the recombine template engine.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "recombine",
    version,
    about = "Generate text from templated documents",
    long_about = "Generate text from a document of data blocks and a syntax section.\n\n\
                  Data blocks are separated by '%' lines, the syntax section follows a\n\
                  '%%' line. Sets are declared with '#name' blocks and expanded into\n\
                  every combination inside '@ ... @' sequences."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate the output of a document.
    Generate(GenerateArgs),

    /// Show the data blocks and sets of a document.
    Inspect(InspectArgs),

    /// List the transform functions usable as modifiers.
    Functions,
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Document to generate from.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file (default: stdout).
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Answer for the next prompt sequence; repeat for several prompts.
    ///
    /// Prompts beyond the given answers are asked on the terminal.
    #[arg(long = "answer", value_name = "VALUE")]
    pub answers: Vec<String>,

    /// Exit with status 1 when generation produced warnings.
    #[arg(long = "deny-warnings")]
    pub deny_warnings: bool,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Document to inspect.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Print JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Engine options shared by every command that loads a document.
#[derive(Args, Clone, Default)]
pub struct EngineArgs {
    /// TOML configuration file (default: recombine.toml next to the input).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Order of set items.
    #[arg(long = "set-order", value_enum)]
    pub set_order: Option<SetOrderArg>,

    /// Seed for random set order.
    #[arg(long = "seed", value_name = "N")]
    pub seed: Option<u64>,

    /// Trim surrounding whitespace from every data block.
    #[arg(long = "trim-trailing-newlines")]
    pub trim_trailing_newlines: bool,

    /// Ignore modifiers on plain tokens.
    #[arg(long = "no-transforms")]
    pub no_transforms: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SetOrderArg {
    Sorted,
    Random,
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
