// src/matching/scorer.rs
use crate::error::{PipelineError, PipelineResult};
use crate::llm::TextGenerator;
use crate::response_parser::{extract_json, JsonShape};
use crate::types::MatchReport;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

pub fn build_match_prompt(
    resume_text: &str,
    job_description: &str,
    job_title: &str,
    company: &str,
) -> String {
    format!(
        r#"You are an expert ATS (Applicant Tracking System) and career counselor. Analyze how well this resume matches the job requirements.

JOB DETAILS:
Title: {job_title}
Company: {company}
Description: {job_description}

RESUME CONTENT:
{resume_text}

Provide a comprehensive analysis in the following JSON format:
{{
  "score": 85,
  "strengths": [
    "Strong experience in required technologies",
    "Leadership experience matches job requirements"
  ],
  "gaps": [
    "Missing experience with specific framework mentioned",
    "Could use more quantified achievements"
  ],
  "suggestions": [
    "Add specific metrics to demonstrate impact",
    "Include keywords like 'machine learning' and 'data analysis'",
    "Reorganize experience section to highlight relevant projects first"
  ],
  "keywordMatches": {{
    "matched": ["JavaScript", "React", "Node.js", "team leadership"],
    "missing": ["Python", "Docker", "CI/CD", "Agile methodology"]
  }}
}}

SCORING CRITERIA:
- 90-100: Excellent match, resume strongly aligns with all requirements
- 80-89: Good match, minor gaps that are easily addressable
- 70-79: Decent match, some important gaps to address
- 60-69: Fair match, significant improvements needed
- Below 60: Poor match, major restructuring required

Focus on:
1. Technical skills alignment
2. Experience level match
3. Industry relevance
4. Keyword optimization for ATS
5. Achievement quantification
6. Cultural fit indicators

Be honest but constructive. Provide actionable suggestions."#
    )
}

/// Score must be numeric and the three advice lists must be arrays
pub fn validate_report_shape(value: &Value) -> PipelineResult<()> {
    if !value["score"].is_number() {
        return Err(PipelineError::MalformedOracleResponse(
            "score is not a number".to_string(),
        ));
    }

    for key in ["strengths", "gaps", "suggestions"] {
        if !value[key].is_array() {
            return Err(PipelineError::MalformedOracleResponse(format!(
                "{} is not an array",
                key
            )));
        }
    }

    Ok(())
}

pub struct MatchScorer {
    generator: Arc<dyn TextGenerator>,
}

impl MatchScorer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn score(
        &self,
        resume_text: &str,
        job_description: &str,
        job_title: &str,
        company: &str,
    ) -> PipelineResult<MatchReport> {
        let prompt = build_match_prompt(resume_text, job_description, job_title, company);
        let raw = self.generator.generate(&prompt).await?;

        let value = extract_json(&raw, JsonShape::Object)?;
        validate_report_shape(&value)?;

        let report: MatchReport = serde_json::from_value(value)
            .map_err(|e| PipelineError::MalformedOracleResponse(e.to_string()))?;

        info!(
            "Match scored {} for {} at {}",
            report.score, job_title, company
        );
        Ok(report)
    }
}
