// src/extraction/field_extractor.rs
use crate::error::PipelineResult;
use crate::llm::TextGenerator;
use crate::response_parser::{parse_response, JsonShape};
use crate::types::ExtractedJobFields;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

pub fn build_extraction_prompt(job_body: &str) -> String {
    format!(
        r#"You are an expert job description parser. Given the following job listing, extract the following:
- Job Title
- Company Name
- 1-2 sentence Summary
- Key Expectations (bulleted or comma-separated)
- Key Qualifications (bulleted or comma-separated)

Return only a JSON object in this format:
{{
  "title": "",
  "company": "",
  "summary": "",
  "expectations": "",
  "qualifications": ""
}}

Here is the job listing:
---
{}"#,
        job_body
    )
}

/// Model output; any of the five fields may be missing or oddly typed
#[derive(Debug, Deserialize)]
struct RawJobFields {
    #[serde(default, deserialize_with = "lenient_text")]
    title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    company: String,
    #[serde(default, deserialize_with = "lenient_text")]
    summary: String,
    #[serde(default, deserialize_with = "lenient_text")]
    expectations: String,
    #[serde(default, deserialize_with = "lenient_text")]
    qualifications: String,
}

/// Strings pass through, lists are joined one item per line, null is empty
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    })
}

pub struct FieldExtractor {
    generator: Arc<dyn TextGenerator>,
}

impl FieldExtractor {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Structured fields for `job_body`; `full_jd` is always `job_body` itself
    pub async fn extract(&self, job_body: &str) -> PipelineResult<ExtractedJobFields> {
        let prompt = build_extraction_prompt(job_body);
        let raw = self.generator.generate(&prompt).await?;
        let parsed: RawJobFields = parse_response(&raw, JsonShape::Object)?;

        info!("Extracted job fields: {} at {}", parsed.title, parsed.company);

        Ok(ExtractedJobFields {
            title: parsed.title,
            company: parsed.company,
            summary: parsed.summary,
            expectations: parsed.expectations,
            qualifications: parsed.qualifications,
            full_jd: job_body.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::llm::testing::ScriptedGenerator;
    use crate::llm::OracleError;

    const BODY: &str =
        "Acme Robotics is hiring a Platform Engineer. You will run our Kubernetes fleet.";

    fn extractor(generator: ScriptedGenerator) -> (FieldExtractor, Arc<ScriptedGenerator>) {
        let generator = Arc::new(generator);
        (FieldExtractor::new(generator.clone()), generator)
    }

    #[tokio::test]
    async fn keeps_input_body_as_full_jd() {
        let (extractor, generator) = extractor(ScriptedGenerator::replying(
            r#"```json
{"title":"Platform Engineer","company":"Acme Robotics","summary":"Run infra.",
 "expectations":"Operate clusters","qualifications":"Kubernetes","fullJD":"a paraphrase"}
```"#,
        ));

        let fields = extractor.extract(BODY).await.unwrap();
        assert_eq!(fields.full_jd, BODY);
        assert_eq!(fields.title, "Platform Engineer");
        assert_eq!(fields.company, "Acme Robotics");
        assert!(generator.last_prompt().unwrap().ends_with(BODY));
    }

    #[tokio::test]
    async fn tolerates_lists_and_missing_fields() {
        let (extractor, _) = extractor(ScriptedGenerator::replying(
            r#"Sure! {"title":"Platform Engineer",
                "expectations":["Operate clusters","Be on call"],"summary":null}"#,
        ));

        let fields = extractor.extract(BODY).await.unwrap();
        assert_eq!(fields.expectations, "Operate clusters\nBe on call");
        assert_eq!(fields.summary, "");
        assert_eq!(fields.company, "");
        assert_eq!(fields.qualifications, "");
    }

    #[tokio::test]
    async fn prose_without_json_is_malformed() {
        let (extractor, _) = extractor(ScriptedGenerator::replying("I cannot help with that."));
        let err = extractor.extract(BODY).await.unwrap_err();
        assert!(matches!(err, PipelineError::MalformedOracleResponse(_)));
    }

    #[tokio::test]
    async fn oracle_failure_is_reported() {
        let (extractor, _) = extractor(ScriptedGenerator::new(vec![Err(OracleError::RateLimited)]));
        let err = extractor.extract(BODY).await.unwrap_err();
        assert!(matches!(err, PipelineError::OracleInvocationFailed(_)));
    }

    #[test]
    fn prompt_requests_json_only_shape() {
        let prompt = build_extraction_prompt(BODY);
        assert!(prompt.contains("Return only a JSON object"));
        assert!(prompt.contains("\"qualifications\": \"\""));
        assert!(prompt.ends_with(&format!("---\n{}", BODY)));
    }
}
