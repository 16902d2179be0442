// src/web/mod.rs
pub mod cors;
pub mod handlers;
pub mod types;

pub use cors::Cors;
pub use types::*;

use crate::config::AppConfig;
use crate::service::JobFitService;
use crate::types::ExtractedJobFields;
use anyhow::Result;
use rocket::data::{Limits, ToByteUnit};
use rocket::form::Form;
use rocket::serde::json::Json;
use rocket::{catchers, get, post, routes, Build, Rocket, State};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Headroom for multipart framing around the PDF itself
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

#[post("/extract-job-from-link", data = "<request>")]
pub async fn extract_job_from_link(
    request: Json<ExtractLinkRequest>,
    service: &State<JobFitService>,
) -> ApiResult<ExtractedJobFields> {
    handlers::extract_job_from_link_handler(request, service)
        .instrument(info_span!("extract_job_from_link", request_id = %Uuid::new_v4()))
        .await
}

#[post("/extract-job-from-text", data = "<request>")]
pub async fn extract_job_from_text(
    request: Json<ExtractTextRequest>,
    service: &State<JobFitService>,
) -> ApiResult<ExtractedJobFields> {
    handlers::extract_job_from_text_handler(request, service)
        .instrument(info_span!("extract_job_from_text", request_id = %Uuid::new_v4()))
        .await
}

#[post("/upload-resume", data = "<upload>")]
pub async fn upload_resume(
    upload: Form<ResumeUploadForm<'_>>,
    service: &State<JobFitService>,
) -> ApiResult<ResumeUploadResponse> {
    handlers::upload_resume_handler(upload, service)
        .instrument(info_span!("upload_resume", request_id = %Uuid::new_v4()))
        .await
}

#[post("/analyze-match", data = "<request>")]
pub async fn analyze_match(
    request: Json<AnalyzeMatchRequest>,
    service: &State<JobFitService>,
) -> ApiResult<AnalyzeMatchResponse> {
    handlers::analyze_match_handler(request, service)
        .instrument(info_span!("analyze_match", request_id = %Uuid::new_v4()))
        .await
}

#[post("/resume-suggestions", data = "<request>")]
pub async fn resume_suggestions(
    request: Json<SuggestionsRequest>,
    service: &State<JobFitService>,
) -> ApiResult<SuggestionsResponse> {
    handlers::resume_suggestions_handler(request, service)
        .instrument(info_span!("resume_suggestions", request_id = %Uuid::new_v4()))
        .await
}

#[get("/health")]
pub async fn health(service: &State<JobFitService>) -> Json<HealthResponse> {
    handlers::health_handler(service).await
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Endpoint not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Check the request path".to_string()],
    ))
}

#[rocket::catch(413)]
pub fn payload_too_large() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body is too large".to_string(),
        "FILE_TOO_LARGE".to_string(),
        vec!["Upload a smaller PDF".to_string()],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable_entity() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body could not be parsed".to_string(),
        "INVALID_INPUT".to_string(),
        vec![
            "Check field names and types".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
    ))
}

/// Assemble the API without launching it
pub fn build_rocket(service: JobFitService, config: &AppConfig) -> Rocket<Build> {
    let upload_limit = (config.limits.max_pdf_bytes + FORM_OVERHEAD_BYTES).bytes();
    let limits = Limits::default()
        .limit("file", upload_limit)
        .limit("data-form", upload_limit)
        .limit("json", 2_usize.mebibytes());

    let figment = rocket::Config::figment()
        .merge(("address", config.server.address.clone()))
        .merge(("port", config.server.port))
        .merge(("limits", limits));

    rocket::custom(figment)
        .attach(Cors)
        .manage(service)
        .register(
            "/api",
            catchers![
                bad_request,
                not_found,
                payload_too_large,
                unprocessable_entity,
                internal_error
            ],
        )
        .mount(
            "/api",
            routes![
                extract_job_from_link,
                extract_job_from_text,
                upload_resume,
                analyze_match,
                resume_suggestions,
                health,
                cors::options,
            ],
        )
}

pub async fn start_web_server(config: AppConfig) -> Result<()> {
    let service = JobFitService::from_config(&config)?;

    info!(
        "Starting job match API on {}:{}",
        config.server.address, config.server.port
    );
    info!("Text generation model: {}", service.model_name());

    let _rocket = build_rocket(service, &config)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket failed to launch: {}", e))?;

    Ok(())
}
