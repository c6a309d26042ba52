//! Normalization helpers shared by the trigger scorer and the snippet retriever.

use serde_json::Value;

use crate::knowledge::models::KnowledgeSnippet;

/// Display label for a record with neither `name` nor `scene`.
pub const DEFAULT_SCENARIO_LABEL: &str = "未命名情境";

/// Normalizes a raw trigger field into a phrase list.
///
/// A bare string becomes a single phrase (multi-word phrases stay whole), an array keeps
/// its string elements, anything else yields no phrases.
pub fn normalize_triggers(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// A free-text field: strings pass through, any other shape reads as absent.
pub fn normalize_text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// Whitespace tokenization. No case folding, no stemming.
pub fn tokenize(query: &str) -> Vec<&str> {
    query.split_whitespace().collect()
}

/// Topic, question and answer joined into one searchable string.
pub fn composite_text(snippet: &KnowledgeSnippet) -> String {
    format!("{} {} {}", snippet.topic, snippet.question, snippet.answer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_and_array_normalize_identically() {
        assert_eq!(
            normalize_triggers(&json!("falls often")),
            normalize_triggers(&json!(["falls often"]))
        );
    }

    #[test]
    fn test_array_drops_non_strings() {
        assert_eq!(normalize_triggers(&json!([1, "打人", null])), vec!["打人"]);
    }

    #[test]
    fn test_other_shapes_are_empty() {
        assert!(normalize_triggers(&json!(null)).is_empty());
        assert!(normalize_triggers(&json!({ "a": "b" })).is_empty());
        assert!(normalize_triggers(&json!(true)).is_empty());
    }

    #[test]
    fn test_tokenize_collapses_whitespace() {
        assert_eq!(tokenize("  嗎啡   成癮\t斷食 "), vec!["嗎啡", "成癮", "斷食"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_composite_text_joins_fields() {
        let snippet = KnowledgeSnippet {
            topic: "嗎啡".into(),
            question: "會成癮嗎".into(),
            answer: "不會".into(),
        };
        assert_eq!(composite_text(&snippet), "嗎啡 會成癮嗎 不會");
    }
}
