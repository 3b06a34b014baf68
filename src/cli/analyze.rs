//! CLI entry-point for a single analysis.

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{analysis::AnalysisRequest, config::Settings, report};

/// Args for the `analyze` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Discussion topic to search for.
    #[arg(long)]
    pub topic: String,
    /// Comma separated keywords to track.
    #[arg(long, value_delimiter = ',', required = true)]
    pub keywords: Vec<String>,
    /// Print the raw result as JSON instead of the text report.
    #[arg(long)]
    pub json: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let request = AnalysisRequest::new(&args.topic, &args.keywords)?;
    let analyzer = super::gemini_analyzer(&settings)?;
    let result = analyzer
        .analyze_request(&request)
        .await
        .context("Analysis Failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", report::Report(&result));
    }
    Ok(())
}
