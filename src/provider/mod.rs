//! Model provider seam used by the analyzer.
//!
//! The analyzer only depends on [`ModelProvider`]; [`gemini::GeminiProvider`]
//! is the production implementation.

pub mod gemini;

use async_trait::async_trait;
use serde::Deserialize;

use crate::{analysis::SourceLink, error::TransportError};

pub use gemini::GeminiProvider;

/// Single grounded generation request.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub prompt: String,
    pub model: String,
    pub api_key: String,
    pub enable_web_search_grounding: bool,
}

/// Fields of a provider response the analyzer consumes. Everything else is ignored.
#[derive(Debug, Clone, Default)]
pub struct ProviderResponse {
    pub text: Option<String>,
    pub grounding_references: Vec<GroundingReference>,
}

/// Raw grounding chunk as reported by the provider.
///
/// Chunks of other kinds deserialize with both fields empty and are dropped
/// by the analyzer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GroundingReference {
    #[serde(default)]
    pub web: Option<SourceLink>,
    #[serde(default)]
    pub maps: Option<SourceLink>,
}

impl GroundingReference {
    pub fn web(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            web: Some(SourceLink::new(uri, title)),
            maps: None,
        }
    }

    pub fn is_linked(&self) -> bool {
        self.web.is_some() || self.maps.is_some()
    }
}

/// A hosted model that can answer one prompt with optional search grounding.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, request: ProviderRequest) -> Result<ProviderResponse, TransportError>;
}

#[async_trait]
impl<T: ModelProvider + ?Sized> ModelProvider for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn generate(&self, request: ProviderRequest) -> Result<ProviderResponse, TransportError> {
        (**self).generate(request).await
    }
}
