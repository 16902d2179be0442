// src/web/handlers/extraction_handlers.rs
use crate::service::JobFitService;
use crate::types::ExtractedJobFields;
use crate::web::types::{pipeline_error, ApiResult, ExtractLinkRequest, ExtractTextRequest};

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

pub async fn extract_job_from_link_handler(
    request: Json<ExtractLinkRequest>,
    service: &State<JobFitService>,
) -> ApiResult<ExtractedJobFields> {
    info!("Extracting job info from link: {}", request.url);

    service
        .extract_job_from_link(&request.url)
        .await
        .map(Json)
        .map_err(|e| pipeline_error(&e, "Failed to extract job info from the link"))
}

pub async fn extract_job_from_text_handler(
    request: Json<ExtractTextRequest>,
    service: &State<JobFitService>,
) -> ApiResult<ExtractedJobFields> {
    info!(
        "Extracting job info from {} characters of pasted text",
        request.text.chars().count()
    );

    service
        .extract_job_from_text(&request.text)
        .await
        .map(Json)
        .map_err(|e| pipeline_error(&e, "Failed to extract job info from the text"))
}
