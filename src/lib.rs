//! Job posting extraction and resume-to-job match scoring.
//!
//! A posting is located in fetched HTML (or taken from pasted text), turned
//! into structured fields by a text-generation model, and compared against a
//! resume extracted from PDF. Both the HTTP API and the CLI go through
//! [`JobFitService`].

pub mod cli;
pub mod config;
pub mod error;
pub mod extraction;
pub mod llm;
pub mod matching;
pub mod pdf_text;
pub mod response_parser;
pub mod service;
pub mod types;
pub mod utils;
pub mod web;

pub use config::AppConfig;
pub use error::{PipelineError, PipelineResult};
pub use service::JobFitService;
pub use web::{build_rocket, start_web_server};
