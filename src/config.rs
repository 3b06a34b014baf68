//! Runtime configuration utilities for keyword-pulse.

use std::env;

use serde::Deserialize;

use crate::analysis::AnalyzerConfig;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration resolved from `.env` and defaults.
#[derive(Clone, Deserialize)]
pub struct Settings {
    /// Gemini API key. Absent keys are reported when an analysis is attempted.
    pub api_key: Option<String>,
    /// Model identifier used for `generateContent`.
    pub model: String,
    /// Base URL of the Generative Language API.
    pub api_base: String,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let api_key = non_blank_var("GEMINI_API_KEY").or_else(|| non_blank_var("API_KEY"));
        let model = non_blank_var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_base =
            non_blank_var("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            api_key,
            model,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Explicit configuration handed to the analyzer at construction time.
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

// Keeps the key out of `?settings` log lines.
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
