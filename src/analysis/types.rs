//! Result and request types shared by the analyzer, the API and the report.

use indexmap::IndexSet;
use serde::{Deserialize, Deserializer, Serialize};
use serde_with::skip_serializing_none;

use crate::error::AnalyzeError;

/// Frequency/relevance figure for one keyword as reported by the model.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordStat {
    pub keyword: String,
    /// Expected in 0..=100; passed through as emitted.
    #[serde(deserialize_with = "lenient_count")]
    pub count: u32,
    #[serde(default)]
    pub context: Option<String>,
}

impl KeywordStat {
    pub fn new(keyword: impl Into<String>, count: u32) -> Self {
        Self {
            keyword: keyword.into(),
            count,
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

// Models sometimes write `12.0` or `"12"`; accept any non-negative number.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let parsed = match &value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(f) if f.is_finite() && f >= 0.0 && f <= f64::from(u32::MAX) => Ok(f.round() as u32),
        _ => Err(serde::de::Error::custom(format!("invalid count {value}"))),
    }
}

/// A titled link attached by search grounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

impl SourceLink {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
        }
    }
}

/// A cited source; at least one of `web`/`maps` is set once filtered.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub web: Option<SourceLink>,
    pub maps: Option<SourceLink>,
}

impl GroundingSource {
    /// Preferred link: web first, then maps.
    pub fn link(&self) -> Option<&SourceLink> {
        self.web.as_ref().or(self.maps.as_ref())
    }

    pub fn uri(&self) -> Option<&str> {
        self.link().map(|l| l.uri.as_str())
    }

    pub fn display_title(&self) -> &str {
        match self.link() {
            Some(link) if !link.title.trim().is_empty() => link.title.as_str(),
            _ => "Untitled Source",
        }
    }
}

/// Outcome of one analysis. Replaced wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub stats: Vec<KeywordStat>,
    pub sources: Vec<GroundingSource>,
    /// RFC 3339 completion time; empty until stamped by the analyzer.
    pub timestamp: String,
}

impl AnalysisResult {
    /// Keyword with the highest count. Later entries win ties.
    pub fn top_keyword(&self) -> Option<&KeywordStat> {
        self.stats
            .iter()
            .reduce(|best, current| if best.count > current.count { best } else { current })
    }
}

/// A validated topic plus an ordered, de-duplicated keyword set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    topic: String,
    keywords: IndexSet<String>,
}

impl AnalysisRequest {
    /// Trim inputs, drop blank and repeated keywords, and reject empty requests.
    pub fn new<I, S>(topic: impl AsRef<str>, keywords: I) -> Result<Self, AnalyzeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let topic = topic.as_ref().trim().to_string();
        if topic.is_empty() {
            return Err(AnalyzeError::InvalidRequest("topic must not be empty".into()));
        }
        let keywords: IndexSet<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        if keywords.is_empty() {
            return Err(AnalyzeError::InvalidRequest(
                "at least one keyword is required".into(),
            ));
        }
        Ok(Self { topic, keywords })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }
}
