//! Command-line interface wiring for keyword-pulse.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::{
    analysis::Analyzer,
    config::Settings,
    provider::{GeminiProvider, ModelProvider},
};

pub mod analyze;
pub mod serve;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Search-grounded keyword pulse for online discussions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Analyze(args) => analyze::run(args, settings).await,
            Commands::Serve(args) => serve::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run one grounded analysis and print the report.
    Analyze(analyze::Args),
    /// Serve the JSON analysis API.
    Serve(serve::Args),
}

/// Build the production analyzer backed by Gemini.
pub(crate) fn gemini_analyzer(settings: &Settings) -> Result<Analyzer<Arc<dyn ModelProvider>>> {
    let provider: Arc<dyn ModelProvider> = Arc::new(GeminiProvider::new(settings)?);
    Ok(Analyzer::new(settings.analyzer_config(), provider))
}
