//! Snippet retrieval for the hospice Q&A knowledge base.

use crate::knowledge::models::{KnowledgeSnippet, ScoredSnippet};
use crate::knowledge::normalize::{composite_text, tokenize};

/// Maximum number of snippets handed to the prompt.
pub const TOP_K: usize = 3;
/// Added when a snippet's topic appears verbatim in the raw query.
const TOPIC_BONUS: u32 = 5;

/// Scores every snippet against `query` and returns the non-zero ones, best first.
///
/// +1 per query token contained in the snippet text, +5 when the topic itself is in the query.
pub fn rank_snippets(query: &str, snippets: &[KnowledgeSnippet]) -> Vec<ScoredSnippet> {
    let tokens = tokenize(query);

    let mut ranked: Vec<ScoredSnippet> = snippets
        .iter()
        .filter_map(|snippet| {
            let content = composite_text(snippet);
            let mut score = tokens.iter().filter(|kw| content.contains(**kw)).count() as u32;
            if !snippet.topic.is_empty() && query.contains(snippet.topic.as_str()) {
                score += TOPIC_BONUS;
            }
            (score > 0).then(|| ScoredSnippet {
                score,
                snippet: snippet.clone(),
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// The top [`TOP_K`] snippets for `query`.
pub fn retrieve_snippets(query: &str, snippets: &[KnowledgeSnippet]) -> Vec<KnowledgeSnippet> {
    rank_snippets(query, snippets)
        .into_iter()
        .take(TOP_K)
        .map(|s| s.snippet)
        .collect()
}
