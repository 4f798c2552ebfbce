//! CLI command implementations
//!
//! This module contains the implementation for each CLI command.

use crate::cli::{OutputFormat, output};
use crate::flexfringe::FlexFringe;
use crate::parser::ResultTable;
use crate::{Config, Result, cli::Cli};
use std::path::PathBuf;

/// Resolve flexfringe, preferring the command line over the config file
fn flexfringe(cli_path: Option<PathBuf>, config: &Config) -> Result<FlexFringe> {
    let explicit = cli_path.or_else(|| config.flexfringe.path.clone());
    FlexFringe::new(explicit)
}

fn print_table(table: &ResultTable, format: OutputFormat) -> Result<()> {
    let mut stdout = std::io::stdout();
    match format {
        OutputFormat::Json => output::output_json(&mut stdout, table),
        OutputFormat::Table => output::output_table(&mut stdout, table),
        OutputFormat::Csv => output::output_csv(&mut stdout, table),
    }
}

/// Fit command implementation
pub mod fit {
    use super::*;
    use crate::cli::Commands;
    use crate::render::GraphViewer;

    /// Execute the fit command
    pub async fn execute(args: Cli, config: Config) -> Result<()> {
        let (tracefile, run, show, format, output_format) = match args.command {
            Commands::Fit {
                tracefile,
                run,
                show,
                format,
                output,
            } => (tracefile, run, show, format, output),
            _ => unreachable!("fit::execute called with wrong command"),
        };

        let ff = flexfringe(args.flexfringe, &config)?;
        let options = run.options(&config);

        tracing::info!("Fitting {:?}", tracefile);
        let model = ff.fit(&tracefile, &options).await?;

        output::output_model(&mut std::io::stdout(), &model, output_format)?;

        if show {
            let format = format.unwrap_or_else(|| config.render.format.clone());
            let viewer = GraphViewer::from_config(&config.render, ff.runner());
            viewer.show(&model, &format).await?;
        }

        Ok(())
    }
}

/// Predict command implementation
pub mod predict {
    use super::*;
    use crate::cli::Commands;
    use crate::flexfringe::Options;
    use crate::outputs::FittedModel;

    /// Execute the predict command
    pub async fn execute(args: Cli, config: Config) -> Result<()> {
        let (tracefile, model, run, output_format) = match args.command {
            Commands::Predict {
                tracefile,
                model,
                run,
                output,
            } => (tracefile, model, run, output),
            _ => unreachable!("predict::execute called with wrong command"),
        };

        let ff = flexfringe(args.flexfringe, &config)?;
        let table = predict(&ff, tracefile, model, &run.options(&config)).await?;

        print_table(&table, output_format)
    }

    /// Predict `tracefile` with the model fitted on `model_trace`, or on
    /// `tracefile` itself
    ///
    /// Only the model file has to exist; the graph is not needed.
    pub(crate) async fn predict(
        ff: &FlexFringe,
        tracefile: PathBuf,
        model_trace: Option<PathBuf>,
        options: &Options,
    ) -> Result<ResultTable> {
        let model = FittedModel::new(model_trace.unwrap_or_else(|| tracefile.clone()));
        tracing::debug!("Using model fitted on {:?}", model.tracefile());

        let table = ff.predict(&model, &tracefile, options).await?;
        tracing::info!("Predicted {} traces", table.len());
        Ok(table)
    }

}

/// Show command implementation
pub mod show {
    use super::*;
    use crate::cli::Commands;
    use crate::outputs::FittedModel;
    use crate::render::GraphViewer;
    use crate::runner::SystemRunner;
    use std::sync::Arc;

    /// Execute the show command
    pub async fn execute(args: Cli, config: Config) -> Result<()> {
        let (tracefile, format, no_open) = match args.command {
            Commands::Show {
                tracefile,
                format,
                no_open,
            } => (tracefile, format, no_open),
            _ => unreachable!("show::execute called with wrong command"),
        };

        let model = FittedModel::locate(&tracefile)?;
        let format = format.unwrap_or_else(|| config.render.format.clone());
        let viewer = GraphViewer::from_config(&config.render, Arc::new(SystemRunner));

        let image = if no_open {
            viewer.render(&model, &format).await?
        } else {
            viewer.show(&model, &format).await?
        };
        println!("{}", image.display());

        Ok(())
    }
}

/// Parse command implementation
pub mod parse {
    use super::*;
    use crate::parser::parse_result_file;

    /// Execute the parse command
    pub fn execute(result_file: PathBuf, output_format: OutputFormat) -> Result<()> {
        tracing::info!("Parsing {:?}", result_file);
        let table = parse_result_file(&result_file)?;
        print_table(&table, output_format)
    }
}
