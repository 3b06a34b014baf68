//! Turn raw model output into an [`AnalysisResult`].
//!
//! Extraction is two-tier: the tagged fenced block first, then any loose
//! array-of-objects literal. Nothing here fails; unparsable input yields an
//! empty stats list.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{prompt::STATS_FENCE_TAG, AnalysisResult, GroundingSource, KeywordStat};

static TAGGED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    let tag = regex::escape(STATS_FENCE_TAG);
    Regex::new(&format!(r"(?s)```{tag}\r?\n(.*?)\r?\n```")).expect("valid regex")
});

// Lazy body, but the match still spans newlines.
static LOOSE_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[\s*\{.*?\}\s*\]").expect("valid regex"));

// First opening tag through the last closing fence.
static STRIP_BLOCK: Lazy<Regex> = Lazy::new(|| {
    let tag = regex::escape(STATS_FENCE_TAG);
    Regex::new(&format!(r"(?s)```{tag}.*```")).expect("valid regex")
});

/// Build a result from model text and already-filtered sources.
///
/// `timestamp` is left empty; the caller stamps completion time.
pub fn normalize(text: &str, sources: Vec<GroundingSource>) -> AnalysisResult {
    AnalysisResult {
        summary: derive_summary(text),
        stats: extract_stats(text),
        sources,
        timestamp: String::new(),
    }
}

/// Parse keyword statistics out of `text`, or return an empty list.
pub fn extract_stats(text: &str) -> Vec<KeywordStat> {
    if let Some(body) = TAGGED_BLOCK.captures(text).and_then(|c| c.get(1)) {
        match parse_stats(body.as_str()) {
            Ok(stats) => return stats,
            Err(err) => warn!(error = %err, "tagged stats block did not parse; trying loose match"),
        }
    }

    let Some(loose) = LOOSE_ARRAY.find(text) else {
        debug!("no stats array found in model output");
        return Vec::new();
    };
    match parse_stats(loose.as_str()) {
        Ok(stats) => stats,
        Err(err) => {
            warn!(error = %err, "failed to parse stats array");
            Vec::new()
        }
    }
}

// The array must be valid JSON; records that do not fit `KeywordStat` are
// skipped individually.
fn parse_stats(raw: &str) -> Result<Vec<KeywordStat>, serde_json::Error> {
    let records: Vec<Value> = serde_json::from_str(raw)?;
    let total = records.len();
    let stats: Vec<KeywordStat> = records
        .into_iter()
        .filter_map(|record| match KeywordStat::deserialize(&record) {
            Ok(stat) => Some(stat),
            Err(err) => {
                warn!(error = %err, %record, "skipping malformed stats record");
                None
            }
        })
        .collect();
    if stats.len() < total {
        debug!(kept = stats.len(), total, "partial stats block");
    }
    Ok(stats)
}

/// Model text with the tagged stats block removed and whitespace trimmed.
pub fn derive_summary(text: &str) -> String {
    STRIP_BLOCK.replace(text, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SourceLink;

    #[test]
    fn tagged_block_is_extracted_and_stripped() {
        let text = "Great discussion.\n```json\n[{\"keyword\":\"battery\",\"count\":12}]\n```";
        let result = normalize(text, vec![]);
        assert_eq!(result.stats, vec![KeywordStat::new("battery", 12)]);
        assert_eq!(result.summary, "Great discussion.");
    }

    #[test]
    fn plain_text_has_no_stats() {
        let result = normalize("  No data here.\n", vec![]);
        assert!(result.stats.is_empty());
        assert_eq!(result.summary, "No data here.");
        assert!(result.timestamp.is_empty());
    }

    #[test]
    fn order_and_duplicates_are_preserved() {
        let text = "Summary\n```json\n[\n  {\"keyword\":\"b\",\"count\":3,\"context\":\"x\"},\n  {\"keyword\":\"a\",\"count\":7},\n  {\"keyword\":\"b\",\"count\":1}\n]\n```\n";
        let stats = extract_stats(text);
        assert_eq!(
            stats,
            vec![
                KeywordStat::new("b", 3).with_context("x"),
                KeywordStat::new("a", 7),
                KeywordStat::new("b", 1),
            ]
        );
    }

    #[test]
    fn crlf_fences_are_accepted() {
        let text = "Hi\r\n```json\r\n[{\"keyword\":\"k\",\"count\":1}]\r\n```";
        assert_eq!(extract_stats(text), vec![KeywordStat::new("k", 1)]);
        assert_eq!(derive_summary(text), "Hi");
    }

    #[test]
    fn malformed_block_yields_empty_stats() {
        let text = "Summary.\n```json\n[{\"keyword\": \"a\", \"count\": }]\n```";
        let result = normalize(text, vec![]);
        assert!(result.stats.is_empty());
        assert_eq!(result.summary, "Summary.");
    }

    #[test]
    fn malformed_block_without_array_yields_empty_stats() {
        let text = "Summary.\n```json\n{not json at all\n```";
        assert!(extract_stats(text).is_empty());
    }

    #[test]
    fn bad_records_are_skipped_individually() {
        let text = "Summary.\n```json\n[{\"keyword\":\"battery\",\"count\":12},{\"keyword\":\"screen\",\"count\":null},{\"keyword\":\"price\"},{\"keyword\":\"case\",\"count\":\"7\"},\"stray\"]\n```";
        assert_eq!(
            extract_stats(text),
            vec![KeywordStat::new("battery", 12), KeywordStat::new("case", 7)]
        );
    }

    #[test]
    fn untagged_array_is_found_by_loose_match() {
        let text = "Here are the stats: [{\"keyword\":\"gpu\",\"count\":40}] thanks";
        assert_eq!(extract_stats(text), vec![KeywordStat::new("gpu", 40)]);
        assert_eq!(derive_summary(text), text);
    }

    #[test]
    fn unfenced_multiline_array_is_found() {
        let text = "Summary\n[\n  {\"keyword\": \"x\", \"count\": 2},\n  {\"keyword\": \"y\", \"count\": 4}\n]\n";
        let keywords: Vec<_> = extract_stats(text)
            .into_iter()
            .map(|s| s.keyword)
            .collect();
        assert_eq!(keywords, vec!["x", "y"]);
    }

    // The loose tier cannot tell a stats array from one quoted in prose. This
    // pins the current behaviour: a broken tagged block falls through to the
    // first array literal anywhere in the text.
    #[test]
    fn loose_match_can_pick_up_array_from_prose() {
        let text = "Users pasted [{\"keyword\":\"prose\",\"count\":1}] in threads.\n```json\n[{broken\n```";
        assert_eq!(extract_stats(text), vec![KeywordStat::new("prose", 1)]);
    }

    #[test]
    fn prose_array_without_stats_shape_is_ignored() {
        let text = "Config looked like [{\"name\": \"a\"}] apparently.";
        assert!(extract_stats(text).is_empty());
    }

    #[test]
    fn summary_strips_from_first_tag_to_last_fence() {
        let text = "Intro\n```json\n[]\n```\nmiddle\n```json\n[]\n```\n";
        assert_eq!(derive_summary(text), "Intro");
    }

    #[test]
    fn summary_keeps_other_code_fences() {
        let text = "Example:\n```rust\nfn main() {}\n```\nDone.";
        assert_eq!(derive_summary(text), text);
    }

    #[test]
    fn sources_pass_through_in_order() {
        let sources = vec![
            GroundingSource {
                web: Some(SourceLink::new("https://b", "B")),
                maps: None,
            },
            GroundingSource {
                web: None,
                maps: Some(SourceLink::new("https://m", "M")),
            },
        ];
        let result = normalize("text", sources.clone());
        assert_eq!(result.sources, sources);
    }
}
