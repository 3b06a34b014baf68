//! Plain-text rendering of an analysis result for the terminal.

use std::fmt;

use crate::analysis::AnalysisResult;

const BAR_WIDTH: usize = 30;

/// Render summary cards, keyword bars, sources and the analysis text.
pub fn render(result: &AnalysisResult) -> String {
    Report(result).to_string()
}

/// Display adapter for the terminal report.
pub struct Report<'a>(pub &'a AnalysisResult);

impl fmt::Display for Report<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        let top = result
            .top_keyword()
            .map(|s| s.keyword.as_str())
            .unwrap_or("N/A");
        writeln!(out, "Analysis completed {}", result.timestamp)?;
        writeln!(out)?;
        writeln!(out, "Keywords found:  {}", result.stats.len())?;
        writeln!(out, "Top keyword:     {top}")?;
        writeln!(out, "Sources scanned: {}", result.sources.len())?;

        writeln!(out)?;
        writeln!(out, "== Keyword Frequency ==")?;
        if result.stats.is_empty() {
            writeln!(out, "No statistical data extracted.")?;
        } else {
            let label_width = result
                .stats
                .iter()
                .map(|s| s.keyword.chars().count())
                .max()
                .unwrap_or(0);
            for stat in &result.stats {
                writeln!(
                    out,
                    "{:<label_width$}  {:<BAR_WIDTH$} {:>3}",
                    stat.keyword,
                    bar(stat.count),
                    stat.count
                )?;
                if let Some(context) = stat.context.as_deref().filter(|c| !c.trim().is_empty()) {
                    writeln!(out, "{:<label_width$}  {context}", "")?;
                }
            }
        }

        writeln!(out)?;
        writeln!(out, "== Source Threads ==")?;
        if result.sources.is_empty() {
            writeln!(out, "No direct sources linked.")?;
        } else {
            for (idx, source) in result.sources.iter().enumerate() {
                writeln!(out, "{:>2}. {}", idx + 1, source.display_title())?;
                if let Some(uri) = source.uri() {
                    writeln!(out, "    {uri}")?;
                }
            }
        }

        writeln!(out)?;
        writeln!(out, "== Analysis Report ==")?;
        writeln!(out, "{}", result.summary)?;
        Ok(())
    }
}

// Counts are a 0-100 scale; anything above fills the bar.
fn bar(count: u32) -> String {
    let filled = (count.min(100) as usize * BAR_WIDTH + 50) / 100;
    "#".repeat(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{GroundingSource, KeywordStat, SourceLink};

    fn sample() -> AnalysisResult {
        AnalysisResult {
            summary: "People like it.".into(),
            stats: vec![
                KeywordStat::new("battery", 50).with_context("mostly complaints"),
                KeywordStat::new("screen", 100),
            ],
            sources: vec![
                GroundingSource {
                    web: Some(SourceLink::new("https://reddit.com/r/x", "r/x thread")),
                    maps: None,
                },
                GroundingSource {
                    web: Some(SourceLink::new("https://reddit.com/r/y", "")),
                    maps: None,
                },
            ],
            timestamp: "2024-01-01T00:00:00.000Z".into(),
        }
    }

    #[test]
    fn renders_cards_bars_and_sources() {
        let text = render(&sample());
        assert!(text.contains("Keywords found:  2"));
        assert!(text.contains("Top keyword:     screen"));
        assert!(text.contains("Sources scanned: 2"));
        assert!(text.contains(&"#".repeat(BAR_WIDTH)));
        assert!(text.contains("mostly complaints"));
        assert!(text.contains(" 1. r/x thread"));
        assert!(text.contains(" 2. Untitled Source"));
        assert!(text.trim_end().ends_with("People like it."));
    }

    #[test]
    fn renders_placeholders_for_empty_result() {
        let result = AnalysisResult {
            summary: "Nothing.".into(),
            stats: vec![],
            sources: vec![],
            timestamp: String::new(),
        };
        let text = render(&result);
        assert!(text.contains("Top keyword:     N/A"));
        assert!(text.contains("No statistical data extracted."));
        assert!(text.contains("No direct sources linked."));
    }

    #[test]
    fn display_matches_render() {
        let result = sample();
        assert_eq!(format!("{}", Report(&result)), render(&result));
    }

    #[test]
    fn bar_scales_and_saturates() {
        assert_eq!(bar(0), "");
        assert_eq!(bar(50).len(), BAR_WIDTH / 2);
        assert_eq!(bar(250).len(), BAR_WIDTH);
    }
}
