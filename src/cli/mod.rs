//! CLI module
//!
//! This module defines the command-line interface using clap and implements
//! the command execution logic.

use crate::flexfringe::Options;
use crate::{Config, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;
pub mod output;

/// Run flexfringe and inspect its outputs
#[derive(Parser, Debug)]
#[command(name = "flexfringe-wrapper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the flexfringe executable (searched on PATH otherwise)
    #[arg(long, global = true, env = "FLEXFRINGE_PATH")]
    pub flexfringe: Option<PathBuf>,

    /// Log level (overrides config)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that runs flexfringe
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Merge heuristic (overrides config)
    #[arg(long)]
    pub heuristic_name: Option<String>,

    /// Heuristic data type (overrides config)
    #[arg(long)]
    pub data_name: Option<String>,

    /// Extra flexfringe option, passed as --KEY=VALUE
    #[arg(short = 'O', long = "option", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub options: Vec<(String, String)>,
}

impl RunArgs {
    /// Layer these arguments on top of the configured options
    pub fn options(&self, config: &Config) -> Options {
        let mut options = config.base_options();
        if let Some(heuristic) = &self.heuristic_name {
            options = options.heuristic(heuristic);
        }
        if let Some(data) = &self.data_name {
            options = options.data(data);
        }
        for (name, value) in &self.options {
            options.insert(name, value);
        }
        options
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Learn a state machine from a trace file
    Fit {
        /// Trace file in abbadingo format
        tracefile: PathBuf,

        #[command(flatten)]
        run: RunArgs,

        /// Render and display the learned graph afterwards
        #[arg(long)]
        show: bool,

        /// Image format used with --show (overrides config)
        #[arg(long)]
        format: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        output: OutputFormat,
    },

    /// Score traces with a previously learned model
    Predict {
        /// Trace file to score
        tracefile: PathBuf,

        /// Trace file the model was fitted on (defaults to TRACEFILE)
        #[arg(short, long)]
        model: Option<PathBuf>,

        #[command(flatten)]
        run: RunArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        output: OutputFormat,
    },

    /// Render and display the graph of a fitted trace file
    Show {
        /// Trace file the model was fitted on
        tracefile: PathBuf,

        /// Image format understood by Graphviz (overrides config)
        #[arg(long)]
        format: Option<String>,

        /// Only render, print the image path instead of opening it
        #[arg(long)]
        no_open: bool,
    },

    /// Decode an existing prediction result file
    Parse {
        /// Path to a .ff.final.json.result file
        result_file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        output: OutputFormat,
    },
}

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text table
    Table,
    /// Semicolon separated values
    Csv,
}

/// Parse a `KEY=VALUE` option argument
pub fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got {:?}", s)),
    }
}

/// Execute the CLI command
pub async fn execute(args: Cli, config: Config) -> Result<()> {
    match args.command {
        Commands::Fit { .. } => commands::fit::execute(args, config).await,
        Commands::Predict { .. } => commands::predict::execute(args, config).await,
        Commands::Show { .. } => commands::show::execute(args, config).await,
        Commands::Parse {
            result_file,
            output,
        } => commands::parse::execute(result_file, output),
    }
}
