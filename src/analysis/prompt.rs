//! Prompt construction.
//!
//! The trailing-block format stated here is the only contract between the
//! model output and [`super::normalize`]. Change the fence tag or field names
//! on both sides together and bump [`PROMPT_FORMAT_VERSION`].

pub const PROMPT_FORMAT_VERSION: u32 = 1;

/// Language tag of the fenced structured-data block.
pub const STATS_FENCE_TAG: &str = "json";

/// Build the single grounded instruction for `topic` and `keywords`.
///
/// Keywords are listed verbatim in the order given; no de-duplication happens here.
pub fn build_prompt<S: AsRef<str>>(topic: &str, keywords: &[S]) -> String {
    let keyword_list = keywords
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ");
    let fence = format!("```{STATS_FENCE_TAG}");

    format!(
        r#"I need you to act as a Reddit scraper and analyzer.

1. SEARCH: Use Google Search to find recent Reddit threads, comments, and discussions regarding the topic: "{topic}".
2. ANALYZE: Scan the content found in these search results for the following specific keywords: {keyword_list}.
3. REPORT:
   - Write a comprehensive summary of the sentiment and context in which these keywords appear on Reddit.
   - Count the approximate frequency or relevance score (0-100) of each keyword based on the search results.

IMPORTANT OUTPUT FORMAT:
Your response must contain a natural language summary FIRST.
Then, AT THE VERY END of your response, strictly provide a JSON code block containing the stats in this format:

{fence}
[
  {{ "keyword": "keyword1", "count": 10, "context": "Used mostly in positive contexts regarding features." }},
  {{ "keyword": "keyword2", "count": 5, "context": "Mentioned as a bug." }}
]
```

Do not add any text after the JSON block.
"#
    )
}
