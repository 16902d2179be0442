// src/types/report.rs
//! Match report returned by the scorer and the feedback payload persisted from it

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Number, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Passed through exactly as the model returned it, no clamping
    pub score: Number,
    #[serde(deserialize_with = "string_entries")]
    pub strengths: Vec<String>,
    #[serde(deserialize_with = "string_entries")]
    pub gaps: Vec<String>,
    #[serde(deserialize_with = "string_entries")]
    pub suggestions: Vec<String>,
    #[serde(rename = "keywordMatches", default)]
    pub keyword_matches: KeywordMatches,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeywordMatches {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl KeywordMatches {
    /// Keeps string entries only, first occurrence wins
    pub fn from_value(value: &Value) -> Self {
        Self {
            matched: string_set(value.get("matched")),
            missing: string_set(value.get("missing")),
        }
    }
}

impl<'de> Deserialize<'de> for KeywordMatches {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Keeps string entries in model order; anything else in the list is skipped
fn string_entries<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let items = Vec::<Value>::deserialize(deserializer)?;
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

fn string_set(value: Option<&Value>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    if let Some(items) = value.and_then(Value::as_array) {
        for item in items.iter().filter_map(Value::as_str) {
            if !out.iter().any(|seen| seen == item) {
                out.push(item.to_string());
            }
        }
    }
    out
}

/// Row handed to the store, upserted per resume
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackRecord {
    pub score: Number,
    /// JSON text of strengths, gaps, suggestions and keyword matches
    pub suggestions: String,
}

impl MatchReport {
    pub fn to_feedback_record(&self) -> FeedbackRecord {
        let details = json!({
            "strengths": self.strengths,
            "gaps": self.gaps,
            "suggestions": self.suggestions,
            "keywordMatches": self.keyword_matches,
        });

        FeedbackRecord {
            score: self.score.clone(),
            suggestions: details.to_string(),
        }
    }
}
