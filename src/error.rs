// src/error.rs
//! Error taxonomy for the extraction and scoring pipeline

use crate::llm::OracleError;
use crate::response_parser::ResponseParseError;

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("Failed to fetch job page: {0}")]
    FetchFailed(String),

    #[error("No extractable content: {0}")]
    NoExtractableContent(String),

    #[error("Unreadable PDF: {0}")]
    UnreadablePdf(String),

    #[error("Text generation failed: {0}")]
    OracleInvocationFailed(#[from] OracleError),

    #[error("Malformed model response: {0}")]
    MalformedOracleResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PipelineError {
    /// Stable machine-readable code, surfaced to HTTP callers
    pub fn code(&self) -> &'static str {
        match self {
            Self::FetchFailed(_) => "FETCH_FAILED",
            Self::NoExtractableContent(_) => "NO_EXTRACTABLE_CONTENT",
            Self::UnreadablePdf(_) => "UNREADABLE_PDF",
            Self::OracleInvocationFailed(_) => "ORACLE_FAILED",
            Self::MalformedOracleResponse(_) => "MALFORMED_ORACLE_RESPONSE",
            Self::InvalidInput(_) => "INVALID_INPUT",
        }
    }

    /// HTTP status the web layer answers with
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput(_) | Self::NoExtractableContent(_) | Self::UnreadablePdf(_) => 400,
            Self::FetchFailed(_) | Self::OracleInvocationFailed(_) => 502,
            Self::MalformedOracleResponse(_) => 502,
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        let hints: &[&str] = match self {
            Self::FetchFailed(_) => &[
                "Check that the job link is reachable",
                "Paste the job description manually instead",
            ],
            Self::NoExtractableContent(_) => &[
                "The page or file does not contain enough readable text",
                "Paste the job description manually or try a different file",
            ],
            Self::UnreadablePdf(_) => &[
                "Check the file is not corrupted or password protected",
                "Export the resume to PDF again and retry",
            ],
            Self::OracleInvocationFailed(_) | Self::MalformedOracleResponse(_) => {
                &["Try again in a few moments"]
            }
            Self::InvalidInput(_) => &["Check the request fields and try again"],
        };
        hints.iter().map(|s| s.to_string()).collect()
    }
}

impl From<ResponseParseError> for PipelineError {
    fn from(err: ResponseParseError) -> Self {
        Self::MalformedOracleResponse(err.to_string())
    }
}
