//! Wire types for the three backend endpoints.

use serde::{Deserialize, Serialize};

use crate::core::notebook::VocabItem;

#[derive(Serialize, Clone)]
pub struct ProcessRequest {
    pub notes: String,
}

#[derive(Serialize, Clone)]
pub struct RefineRequest {
    pub items: Vec<VocabItem>,
    pub notes: String,
    pub feedback: String,
}

#[derive(Serialize, Clone)]
pub struct SaveRequest {
    pub items: Vec<VocabItem>,
    pub theme: String,
}

/// Response to a process request. `items` and `theme` are optional so the
/// session can tell "omitted" from "present but empty" when applying them.
#[derive(Deserialize, Debug, Clone)]
pub struct ProcessResponse {
    pub preview: String,
    #[serde(default)]
    pub items: Option<Vec<VocabItem>>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub grammar: Option<GrammarReport>,
    #[serde(default)]
    pub suggestions: Option<Vec<VocabItem>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RefineResponse {
    pub preview: String,
    #[serde(default)]
    pub items: Option<Vec<VocabItem>>,
    #[serde(default)]
    pub theme: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SaveResponse {
    pub saved: u32,
    pub failed: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GrammarReport {
    pub checked: bool,
    pub has_issues: bool,
    #[serde(default)]
    pub issues: Vec<GrammarIssue>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GrammarIssue {
    pub item_index: u32,
    pub field: GrammarField,
    pub original: String,
    pub corrected: String,
    pub explanation: String,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GrammarField {
    English,
    Example,
}

impl GrammarField {
    pub fn as_str(self) -> &'static str {
        match self {
            GrammarField::English => "english",
            GrammarField::Example => "example",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_response_accepts_minimal_payload() {
        let response: ProcessResponse = serde_json::from_str(r#"{"preview":"1. a b"}"#).unwrap();
        assert_eq!(response.preview, "1. a b");
        assert!(response.items.is_none());
        assert!(response.theme.is_none());
        assert!(response.grammar.is_none());
        assert!(response.suggestions.is_none());
    }

    #[test]
    fn process_response_distinguishes_empty_items_from_absent() {
        let response: ProcessResponse =
            serde_json::from_str(r#"{"preview":"p","items":[]}"#).unwrap();
        assert_eq!(response.items, Some(vec![]));
    }

    #[test]
    fn grammar_report_parses_issue_fields() {
        let raw = r#"{
            "checked": true,
            "has_issues": true,
            "issues": [{
                "item_index": 2,
                "field": "english",
                "original": "He go",
                "corrected": "He goes",
                "explanation": "subject-verb agreement"
            }]
        }"#;
        let report: GrammarReport = serde_json::from_str(raw).unwrap();
        assert!(report.checked);
        assert!(report.has_issues);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].field, GrammarField::English);
        assert_eq!(report.issues[0].item_index, 2);
    }

    #[test]
    fn grammar_field_rejects_unknown_values() {
        assert!(serde_json::from_str::<GrammarField>(r#""chinese""#).is_err());
        assert_eq!(
            serde_json::from_str::<GrammarField>(r#""example""#).unwrap(),
            GrammarField::Example
        );
    }

    #[test]
    fn requests_serialize_with_wire_field_names() {
        let request = RefineRequest {
            items: vec![VocabItem {
                english: "hello".into(),
                chinese: "你好".into(),
                example_en: "Hello there.".into(),
                example_zh: "你好呀。".into(),
            }],
            notes: "notes".into(),
            feedback: "add one more".into(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["items"][0]["example_en"], "Hello there.");
        assert_eq!(value["feedback"], "add one more");

        let save = SaveRequest {
            items: vec![],
            theme: "旅行".into(),
        };
        let value = serde_json::to_value(&save).unwrap();
        assert_eq!(value["theme"], "旅行");
        assert!(value["items"].as_array().unwrap().is_empty());
    }
}
