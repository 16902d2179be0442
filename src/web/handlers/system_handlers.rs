// src/web/handlers/system_handlers.rs
use crate::service::JobFitService;
use crate::web::types::HealthResponse;

use rocket::serde::json::Json;
use rocket::State;
use tracing::debug;

pub async fn health_handler(service: &State<JobFitService>) -> Json<HealthResponse> {
    debug!("Health check");
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        model: service.model_name().to_string(),
    })
}
