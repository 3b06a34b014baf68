//! Search-grounded keyword analysis: one model call, normalized into a
//! summary, keyword statistics and cited sources.

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod provider;
pub mod report;

pub use analysis::{AnalysisRequest, AnalysisResult, Analyzer, AnalyzerConfig};
pub use error::{AnalyzeError, TransportError};
