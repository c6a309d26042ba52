use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::knowledge::normalize::{normalize_text, normalize_triggers, DEFAULT_SCENARIO_LABEL};

/// One condition/scenario entry in the dementia or caregiver knowledge base.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerRecord {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub scene: Option<String>,
    /// Stored in the JSON as either a single phrase or a list of phrases.
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub triggers: Vec<String>,
    #[serde(
        default,
        alias = "warning",
        alias = "warningSignal",
        deserialize_with = "deserialize_text"
    )]
    pub warning_signal: Option<String>,
    #[serde(
        default,
        alias = "strategy",
        alias = "preventionStrategy",
        deserialize_with = "deserialize_text"
    )]
    pub prevention_strategy: Option<String>,
    #[serde(
        default,
        alias = "recommendedServiceCodes",
        alias = "recommended_services",
        deserialize_with = "deserialize_string_list"
    )]
    pub recommend_services: Vec<String>,
}

impl TriggerRecord {
    /// `name`, else `scene`, else a fixed label, so every match can be rendered.
    pub fn display_name(&self) -> &str {
        [self.name.as_deref(), self.scene.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SCENARIO_LABEL)
    }
}

/// A billable care-service offering. Keyed by code in [`KnowledgeBase::services`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "desc")]
    pub description: String,
    #[serde(default)]
    pub price: f64,
}

/// One hospice-care Q&A entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeSnippet {
    #[serde(default, deserialize_with = "deserialize_text_or_empty")]
    pub topic: String,
    #[serde(default, deserialize_with = "deserialize_text_or_empty")]
    pub question: String,
    #[serde(default, deserialize_with = "deserialize_text_or_empty")]
    pub answer: String,
}

/// Output of trigger scoring for a single record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub name: String,
    pub score: u32,
    /// Literal trigger phrases found in the query, in trigger order.
    pub matched: Vec<String>,
    pub record: TriggerRecord,
}

/// A snippet with its relevance score against a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSnippet {
    pub score: u32,
    #[serde(flatten)]
    pub snippet: KnowledgeSnippet,
}

/// Everything loaded from the static data directory. Read-only after startup.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    pub dementia: Vec<TriggerRecord>,
    pub caregiver: Vec<TriggerRecord>,
    pub services: BTreeMap<String, ServiceRecord>,
    pub hospice: Vec<KnowledgeSnippet>,
    /// Files that existed but could not be parsed.
    pub load_errors: Vec<String>,
}

/// Accepts a string or a list of strings; any other shape becomes an empty list.
fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(normalize_triggers(&value))
}

/// Accepts a string; any other shape, `null` included, becomes `None`.
fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(normalize_text(&value))
}

fn deserialize_text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_text(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_string_trigger_is_wrapped() {
        let record: TriggerRecord =
            serde_json::from_value(json!({ "name": "跌倒", "triggers": "falls often" })).unwrap();
        assert_eq!(record.triggers, vec!["falls often"]);
    }

    #[test]
    fn test_malformed_trigger_field_is_empty() {
        let record: TriggerRecord =
            serde_json::from_value(json!({ "name": "x", "triggers": 42 })).unwrap();
        assert!(record.triggers.is_empty());

        let record: TriggerRecord = serde_json::from_value(json!({ "name": "x" })).unwrap();
        assert!(record.triggers.is_empty());
    }

    #[test]
    fn test_non_string_text_fields_degrade_to_none() {
        let record: TriggerRecord = serde_json::from_value(json!({
            "name": 42,
            "scene": null,
            "triggers": ["跌倒"],
            "warning": ["a", "b"],
            "strategy": { "step": 1 }
        }))
        .unwrap();
        assert_eq!(record.name, None);
        assert_eq!(record.scene, None);
        assert_eq!(record.warning_signal, None);
        assert_eq!(record.prevention_strategy, None);
        assert_eq!(record.triggers, vec!["跌倒"]);
        assert_eq!(record.display_name(), DEFAULT_SCENARIO_LABEL);
    }

    #[test]
    fn test_field_aliases() {
        let record: TriggerRecord = serde_json::from_value(json!({
            "name": "夜間遊走",
            "triggers": ["半夜", "亂跑"],
            "warning": "走失風險",
            "strategy": "安裝門鈴感應",
            "recommend_services": ["BA01", "CA07"]
        }))
        .unwrap();
        assert_eq!(record.warning_signal.as_deref(), Some("走失風險"));
        assert_eq!(record.prevention_strategy.as_deref(), Some("安裝門鈴感應"));
        assert_eq!(record.recommend_services, vec!["BA01", "CA07"]);

        let camel: TriggerRecord = serde_json::from_value(json!({
            "warningSignal": "w",
            "preventionStrategy": "p",
            "recommendedServiceCodes": "BA01"
        }))
        .unwrap();
        assert_eq!(camel.warning_signal.as_deref(), Some("w"));
        assert_eq!(camel.prevention_strategy.as_deref(), Some("p"));
        assert_eq!(camel.recommend_services, vec!["BA01"]);
    }

    #[test]
    fn test_display_name_fallbacks() {
        let named = TriggerRecord {
            name: Some("攻擊行為".into()),
            scene: Some("場景".into()),
            ..Default::default()
        };
        assert_eq!(named.display_name(), "攻擊行為");

        let scene_only = TriggerRecord {
            name: Some("   ".into()),
            scene: Some("洗澡抗拒".into()),
            ..Default::default()
        };
        assert_eq!(scene_only.display_name(), "洗澡抗拒");

        assert_eq!(TriggerRecord::default().display_name(), DEFAULT_SCENARIO_LABEL);
    }

    #[test]
    fn test_snippet_non_string_fields_become_empty() {
        let snippet: KnowledgeSnippet = serde_json::from_value(json!({
            "topic": 7,
            "question": "會成癮嗎",
            "answer": ["不會"]
        }))
        .unwrap();
        assert_eq!(snippet.topic, "");
        assert_eq!(snippet.question, "會成癮嗎");
        assert_eq!(snippet.answer, "");
    }

    #[test]
    fn test_service_desc_alias() {
        let svc: ServiceRecord = serde_json::from_value(json!({
            "name": "居家照顧",
            "desc": "照服員到府協助",
            "price": 260
        }))
        .unwrap();
        assert_eq!(svc.description, "照服員到府協助");
        assert_eq!(svc.price, 260.0);
    }
}
