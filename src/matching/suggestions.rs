// src/matching/suggestions.rs
use crate::error::PipelineResult;
use crate::llm::TextGenerator;
use crate::response_parser::{extract_json, JsonShape};
use crate::types::TargetJob;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Suggestions at or below this many characters are dropped
pub const MIN_SUGGESTION_CHARS: usize = 10;

pub fn build_suggestions_prompt(resume_text: &str, target: Option<&TargetJob>) -> String {
    let job_context = target
        .map(|job| {
            format!(
                "Target Job: {} at {}\nJob Description: {}\n\n",
                job.title, job.company, job.description
            )
        })
        .unwrap_or_default();
    let for_target = if target.is_some() { " for the target job" } else { "" };
    let tailoring = if target.is_some() {
        "- Tailoring for the specific role and company"
    } else {
        ""
    };

    format!(
        r#"You are a professional resume writer with 15+ years of experience. Analyze this resume and provide specific, actionable improvement suggestions.

{job_context}RESUME CONTENT:
{resume_text}

Provide 5-8 specific suggestions to improve this resume{for_target}.
Focus on:
- Content improvements (skills, experience, achievements)
- Formatting and structure
- Keyword optimization
- Quantifying achievements
- ATS optimization
{tailoring}

Return only a JSON array of strings:
[
  "Add specific metrics to quantify your achievements (e.g., 'Increased sales by 25%' instead of 'Increased sales')",
  "Include more relevant keywords from the job description in your skills section",
  "Reorganize experience bullets to lead with your most impressive accomplishments"
]

Each suggestion should be:
- Specific and actionable
- Focused on one improvement area
- Immediately implementable
- Professionally written"#
    )
}

/// String entries longer than the minimum, in model order
pub fn filter_suggestions(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .filter(|s| s.chars().count() > MIN_SUGGESTION_CHARS)
        .map(str::to_string)
        .collect()
}

pub struct ResumeAdvisor {
    generator: Arc<dyn TextGenerator>,
}

impl ResumeAdvisor {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn suggest(
        &self,
        resume_text: &str,
        target: Option<&TargetJob>,
    ) -> PipelineResult<Vec<String>> {
        let prompt = build_suggestions_prompt(resume_text, target);
        let raw = self.generator.generate(&prompt).await?;

        let value = extract_json(&raw, JsonShape::Array)?;
        let items = value.as_array().map(Vec::as_slice).unwrap_or_default();
        let suggestions = filter_suggestions(items);

        debug!(
            "Kept {} of {} suggestions after filtering",
            suggestions.len(),
            items.len()
        );
        info!("Generated {} resume suggestions", suggestions.len());
        Ok(suggestions)
    }
}
