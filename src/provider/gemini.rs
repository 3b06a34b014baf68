//! Google Gemini `generateContent` client with Google Search grounding.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{GroundingReference, ModelProvider, ProviderRequest, ProviderResponse};
use crate::{config::Settings, error::TransportError};

/// HTTP client bound to one Generative Language API base URL.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    api_base: String,
}

impl GeminiProvider {
    pub fn new(settings: &Settings) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("keyword-pulse/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()?;
        Ok(Self {
            client,
            api_base: settings.api_base.clone(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/models/{model}:generateContent", self.api_base)
    }
}

#[async_trait]
impl ModelProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip_all, fields(model = %request.model))]
    async fn generate(&self, request: ProviderRequest) -> Result<ProviderResponse, TransportError> {
        let body = GenerateContentRequest::from_request(&request);
        let resp = self
            .client
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", &request.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let payload = resp.text().await?;
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: payload,
            });
        }
        debug!(bytes = payload.len(), "received gemini response");
        decode_response(&payload)
    }
}

/// Decode a successful `generateContent` body.
pub(crate) fn decode_response(payload: &str) -> Result<ProviderResponse, TransportError> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(payload).map_err(|e| TransportError::Decode(e.to_string()))?;
    if let Some(err) = parsed.error {
        return Err(TransportError::Api(err.message));
    }
    Ok(parsed.into_response())
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

impl GenerateContentRequest {
    fn from_request(request: &ProviderRequest) -> Self {
        let tools = if request.enable_web_search_grounding {
            vec![Tool {
                google_search: GoogleSearch {},
            }]
        } else {
            Vec::new()
        };
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            tools,
        }
    }
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

impl GenerateContentResponse {
    fn into_response(self) -> ProviderResponse {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return ProviderResponse::default();
        };
        let texts: Vec<String> = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text)
            .collect();
        let text = if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        };
        let grounding_references = candidate
            .grounding_metadata
            .map(|m| m.grounding_chunks)
            .unwrap_or_default();
        ProviderResponse {
            text,
            grounding_references,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingReference>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}
