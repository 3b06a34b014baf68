use keyword_pulse::analysis::{
    normalize::{derive_summary, extract_stats, normalize},
    GroundingSource, KeywordStat, SourceLink,
};
use proptest::prelude::*;

#[test]
fn fenced_block_becomes_stats() {
    let text = "Great discussion.\n```json\n[{\"keyword\":\"battery\",\"count\":12}]\n```";
    let result = normalize(text, vec![]);
    assert_eq!(result.stats, vec![KeywordStat::new("battery", 12)]);
    assert_eq!(result.summary, "Great discussion.");
}

#[test]
fn text_without_block_is_summary() {
    let result = normalize("No data here.", vec![]);
    assert!(result.stats.is_empty());
    assert_eq!(result.summary, "No data here.");
}

#[test]
fn sources_are_returned_unchanged() {
    let sources = vec![
        GroundingSource {
            web: Some(SourceLink::new("https://a", "A")),
            maps: None,
        },
        GroundingSource {
            web: Some(SourceLink::new("https://b", "B")),
            maps: Some(SourceLink::new("https://maps/b", "B on maps")),
        },
    ];
    let result = normalize("whatever", sources.clone());
    assert_eq!(result.sources, sources);
}

fn stat_strategy() -> impl Strategy<Value = KeywordStat> {
    ("[a-z][a-z ]{0,12}", 0u32..=100, proptest::option::of("[A-Za-z ,.]{0,30}")).prop_map(
        |(keyword, count, context)| KeywordStat {
            keyword,
            count,
            context,
        },
    )
}

proptest! {
    #[test]
    fn normalize_never_panics(text in "\\PC*") {
        let _ = normalize(&text, vec![]);
    }

    #[test]
    fn normalize_never_panics_on_fenced_noise(prefix in "[^`]*", body in "[^`]*") {
        let text = format!("{prefix}\n```json\n{body}\n```");
        let result = normalize(&text, vec![]);
        prop_assert!(!result.summary.contains("```json"));
    }

    #[test]
    fn encoded_stats_round_trip_in_order(
        prose in "[A-Za-z .,!]{0,80}",
        stats in proptest::collection::vec(stat_strategy(), 1..6),
    ) {
        let block = serde_json::to_string_pretty(&stats).unwrap();
        let text = format!("{prose}\n```json\n{block}\n```");
        prop_assert_eq!(extract_stats(&text), stats);
        let summary = derive_summary(&text);
        prop_assert!(!summary.contains(&block));
        prop_assert_eq!(summary, prose.trim());
    }

    #[test]
    fn plain_prose_has_no_stats(text in "[A-Za-z0-9 .,!?\n]{0,200}") {
        let result = normalize(&text, vec![]);
        prop_assert!(result.stats.is_empty());
        prop_assert_eq!(result.summary, text.trim());
    }
}
