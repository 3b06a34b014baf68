//! Keyword analysis orchestration layer.

pub mod normalize;
pub mod prompt;
pub mod types;

use chrono::{SecondsFormat, Utc};
use tracing::{error, info, instrument};

use crate::{
    error::AnalyzeError,
    provider::{GroundingReference, ModelProvider, ProviderRequest},
};

pub use normalize::normalize;
pub use types::{AnalysisRequest, AnalysisResult, GroundingSource, KeywordStat, SourceLink};

/// Text used when the provider returns no text at all.
pub const EMPTY_RESPONSE_PLACEHOLDER: &str = "No text content generated.";

/// Credential and model selection handed to the [`Analyzer`] at construction.
#[derive(Clone, Default)]
pub struct AnalyzerConfig {
    pub api_key: Option<String>,
    pub model: String,
}

impl std::fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .finish()
    }
}

/// Runs one grounded model call per analysis and normalizes its output.
pub struct Analyzer<P> {
    config: AnalyzerConfig,
    provider: P,
}

impl<P: ModelProvider> Analyzer<P> {
    pub fn new(config: AnalyzerConfig, provider: P) -> Self {
        Self { config, provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Analyze a validated request.
    pub async fn analyze_request(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalyzeError> {
        let keywords: Vec<&str> = request.keywords().collect();
        self.analyze(request.topic(), &keywords).await
    }

    /// Single best-effort analysis of `topic` for `keywords`.
    ///
    /// Keywords are used as given; callers de-duplicate them (see
    /// [`AnalysisRequest::new`]).
    #[instrument(skip(self, keywords), fields(provider = self.provider.name(), keywords = keywords.len()))]
    pub async fn analyze<S: AsRef<str>>(
        &self,
        topic: &str,
        keywords: &[S],
    ) -> Result<AnalysisResult, AnalyzeError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AnalyzeError::Configuration("API key is missing".into()))?;
        if topic.trim().is_empty() {
            return Err(AnalyzeError::InvalidRequest("topic must not be empty".into()));
        }
        if keywords.is_empty() {
            return Err(AnalyzeError::InvalidRequest(
                "at least one keyword is required".into(),
            ));
        }

        let request = ProviderRequest {
            prompt: prompt::build_prompt(topic, keywords),
            model: self.config.model.clone(),
            api_key: api_key.to_string(),
            enable_web_search_grounding: true,
        };
        let response = self.provider.generate(request).await.map_err(|err| {
            error!(error = %err, "model provider call failed");
            err
        })?;

        let text = response
            .text
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| EMPTY_RESPONSE_PLACEHOLDER.to_string());
        let sources = filter_sources(response.grounding_references);

        let mut result = normalize(&text, sources);
        result.timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        info!(
            format_version = prompt::PROMPT_FORMAT_VERSION,
            stats = result.stats.len(),
            sources = result.sources.len(),
            "analysis complete"
        );
        Ok(result)
    }
}

/// Keep references carrying a web or maps payload.
pub fn filter_sources(references: Vec<GroundingReference>) -> Vec<GroundingSource> {
    references
        .into_iter()
        .filter(GroundingReference::is_linked)
        .map(|r| GroundingSource {
            web: r.web,
            maps: r.maps,
        })
        .collect()
}
