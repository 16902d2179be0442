// src/web/types.rs
use crate::error::PipelineError;
use crate::types::{ExtractedJobFields, FeedbackRecord, MatchReport, TargetJob};
use rocket::form::FromForm;
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ExtractLinkRequest {
    #[serde(alias = "jobLink")]
    pub url: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ExtractTextRequest {
    pub text: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct AnalyzeMatchRequest {
    pub resume_text: String,
    pub job: ExtractedJobFields,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct SuggestionsRequest {
    pub resume_text: String,
    #[serde(default)]
    pub target_job: Option<TargetJob>,
}

#[derive(FromForm)]
pub struct ResumeUploadForm<'f> {
    pub file: TempFile<'f>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct ResumeUploadResponse {
    pub filename: String,
    pub extracted_length: usize,
    pub content: String,
    pub message: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct AnalyzeMatchResponse {
    pub match_score: serde_json::Number,
    pub analysis: MatchReport,
    pub job_title: String,
    pub feedback: FeedbackRecord,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SuggestionsResponse {
    pub suggestions: Vec<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub model: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Error,
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
        }
    }
}

/// Error body paired with the status it is sent with
pub type ApiError = (Status, Json<StandardErrorResponse>);
pub type ApiResult<T> = Result<Json<T>, ApiError>;

pub fn api_error(status: Status, error: &str, code: &str, suggestions: Vec<String>) -> ApiError {
    (
        status,
        Json(StandardErrorResponse::new(
            error.to_string(),
            code.to_string(),
            suggestions,
        )),
    )
}

/// Keeps the caller-facing message generic; the detail went to the log
pub fn pipeline_error(err: &PipelineError, message: &str) -> ApiError {
    let status = Status::from_code(err.http_status()).unwrap_or(Status::InternalServerError);
    let error = match err {
        PipelineError::InvalidInput(detail) => detail.clone(),
        _ => message.to_string(),
    };
    api_error(status, &error, err.code(), err.suggestions())
}
