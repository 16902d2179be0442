// src/service.rs
//! Per-request orchestration of the extraction and scoring pipeline.
//!
//! Every operation is stateless; the service only holds shared clients.

use crate::config::{AppConfig, LimitSettings};
use crate::error::{PipelineError, PipelineResult};
use crate::extraction::{
    normalize_whitespace, validate_job_url, ContentLocator, FieldExtractor, PageFetcher,
    MIN_JOB_CHARS,
};
use crate::llm::{self, TextGenerator};
use crate::matching::{MatchScorer, ResumeAdvisor};
use crate::pdf_text;
use crate::types::{ExtractedJobFields, JobPostingText, MatchReport, ResumeText, TargetJob};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info, warn};

pub struct JobFitService {
    fetcher: PageFetcher,
    locator: ContentLocator,
    extractor: FieldExtractor,
    scorer: MatchScorer,
    advisor: ResumeAdvisor,
    limits: LimitSettings,
    model: String,
}

impl JobFitService {
    /// Service backed by the configured Gemini model
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let generator =
            llm::build_generator(&config.oracle).context("Failed to create text generator")?;
        Self::new(config, generator)
    }

    pub fn new(config: &AppConfig, generator: Arc<dyn TextGenerator>) -> Result<Self> {
        let fetcher = PageFetcher::new(&config.limits).context("Failed to create HTTP client")?;

        Ok(Self {
            fetcher,
            locator: ContentLocator::new(),
            extractor: FieldExtractor::new(generator.clone()),
            scorer: MatchScorer::new(generator.clone()),
            advisor: ResumeAdvisor::new(generator.clone()),
            limits: config.limits.clone(),
            model: generator.model_name().to_string(),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model
    }

    pub fn limits(&self) -> &LimitSettings {
        &self.limits
    }

    /// Fetch a posting, locate its body and extract structured fields
    pub async fn extract_job_from_link(&self, url: &str) -> PipelineResult<ExtractedJobFields> {
        let result = async {
            let url = validate_job_url(url)?;
            let html = self.fetcher.fetch(&url).await?;
            let body = self.locator.locate(&html)?;
            let posting = JobPostingText::from_url(url.as_str(), body);
            info!("Located {} characters of job content", posting.len());
            self.extractor.extract(&posting.body).await
        }
        .await;

        log_outcome("extract_job_from_link", &result);
        result
    }

    /// Extract fields from a description the user pasted
    pub async fn extract_job_from_text(&self, text: &str) -> PipelineResult<ExtractedJobFields> {
        let result = async {
            let posting = JobPostingText::from_text(normalize_whitespace(text));
            if !posting.is_usable(MIN_JOB_CHARS) {
                return Err(PipelineError::NoExtractableContent(format!(
                    "job description has {} characters (need {})",
                    posting.len(),
                    MIN_JOB_CHARS
                )));
            }
            self.extractor.extract(&posting.body).await
        }
        .await;

        log_outcome("extract_job_from_text", &result);
        result
    }

    pub async fn parse_resume(&self, pdf_bytes: Vec<u8>) -> PipelineResult<ResumeText> {
        let result = if pdf_bytes.len() > self.limits.max_pdf_bytes {
            Err(PipelineError::InvalidInput(format!(
                "PDF is {} bytes, the limit is {}",
                pdf_bytes.len(),
                self.limits.max_pdf_bytes
            )))
        } else {
            pdf_text::extract_resume_text_async(pdf_bytes).await
        };

        log_outcome("parse_resume", &result);
        result
    }

    pub async fn analyze_match(
        &self,
        resume_text: &str,
        job: &ExtractedJobFields,
    ) -> PipelineResult<MatchReport> {
        let result = async {
            if resume_text.trim().is_empty() {
                return Err(PipelineError::InvalidInput(
                    "Resume text is required".to_string(),
                ));
            }
            job.validate_for_match()
                .map_err(PipelineError::InvalidInput)?;

            self.scorer
                .score(resume_text, &job.full_jd, &job.title, &job.company)
                .await
        }
        .await;

        log_outcome("analyze_match", &result);
        result
    }

    pub async fn resume_suggestions(
        &self,
        resume_text: &str,
        target: Option<&TargetJob>,
    ) -> PipelineResult<Vec<String>> {
        let result = async {
            if resume_text.trim().is_empty() {
                return Err(PipelineError::InvalidInput(
                    "Resume text is required".to_string(),
                ));
            }
            self.advisor.suggest(resume_text, target).await
        }
        .await;

        log_outcome("resume_suggestions", &result);
        result
    }
}

/// One breadcrumb per failure, tagged with its kind
fn log_outcome<T>(operation: &str, result: &PipelineResult<T>) {
    match result {
        Ok(_) => info!(operation, "completed"),
        Err(e @ (PipelineError::InvalidInput(_) | PipelineError::NoExtractableContent(_))) => {
            warn!(operation, code = e.code(), "{}", e)
        }
        Err(e) => error!(operation, code = e.code(), "{}", e),
    }
}
