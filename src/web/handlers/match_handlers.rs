// src/web/handlers/match_handlers.rs
use crate::service::JobFitService;
use crate::web::types::{
    pipeline_error, AnalyzeMatchRequest, AnalyzeMatchResponse, ApiResult, SuggestionsRequest,
    SuggestionsResponse,
};

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

pub async fn analyze_match_handler(
    request: Json<AnalyzeMatchRequest>,
    service: &State<JobFitService>,
) -> ApiResult<AnalyzeMatchResponse> {
    let request = request.into_inner();
    let job_title = request.job.display_title();
    info!("Analyzing match against {}", job_title);

    let report = service
        .analyze_match(&request.resume_text, &request.job)
        .await
        .map_err(|e| pipeline_error(&e, "Failed to analyze resume-job match"))?;

    Ok(Json(AnalyzeMatchResponse {
        match_score: report.score.clone(),
        feedback: report.to_feedback_record(),
        analysis: report,
        job_title,
    }))
}

pub async fn resume_suggestions_handler(
    request: Json<SuggestionsRequest>,
    service: &State<JobFitService>,
) -> ApiResult<SuggestionsResponse> {
    let request = request.into_inner();

    let suggestions = service
        .resume_suggestions(&request.resume_text, request.target_job.as_ref())
        .await
        .map_err(|e| pipeline_error(&e, "Failed to generate resume suggestions"))?;

    Ok(Json(SuggestionsResponse { suggestions }))
}
