//! Error taxonomy for the analysis core.

use thiserror::Error;

/// Failures surfaced by [`crate::analysis::Analyzer`].
///
/// Parse failures inside the normalizer never reach this type; they degrade
/// the result instead.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// No API credential was configured.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Topic or keyword list was empty.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// The model provider call failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Network or provider-side failure of the single model call.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to model provider failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model provider returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("model provider error: {0}")]
    Api(String),
    #[error("could not decode model provider response: {0}")]
    Decode(String),
}

impl AnalyzeError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
