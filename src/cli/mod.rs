//! Command-line interface definition

use std::path::PathBuf;

use clap::Parser;

pub mod commands;
pub mod formatters;
pub mod output;

pub use commands::Commands;
pub use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "scout")]
#[command(author, version, about = "Search agent profiles and skill packages by keyword")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Robot mode: JSON output on stdout, JSON logs on stderr
    #[arg(long, global = true, env = "SCOUT_ROBOT")]
    pub robot: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (replaces the global and project layers)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding combined.json or agents.json
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short = 'O', long = "output-format", global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective output format. Robot mode without an explicit format means JSON.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        match self.format {
            Some(format) => format,
            None if self.robot => OutputFormat::Json,
            None => OutputFormat::Human,
        }
    }
}
