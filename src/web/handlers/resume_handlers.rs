// src/web/handlers/resume_handlers.rs
use crate::service::JobFitService;
use crate::utils::{has_pdf_extension, upload_display_name};
use crate::web::types::{
    api_error, pipeline_error, ApiResult, ResumeUploadForm, ResumeUploadResponse,
};

use rocket::form::Form;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

pub async fn upload_resume_handler(
    mut upload: Form<ResumeUploadForm<'_>>,
    service: &State<JobFitService>,
) -> ApiResult<ResumeUploadResponse> {
    let content_type = upload.file.content_type().cloned();
    let file_size = upload.file.len();

    let filename = upload
        .file
        .raw_name()
        .and_then(|n| upload_display_name(n.dangerous_unsafe_unsanitized_raw().as_str()))
        .unwrap_or_else(|| "resume.pdf".to_string());

    info!("Resume upload: {} ({} bytes)", filename, file_size);

    let is_pdf = content_type.as_ref().map_or(false, |ct| ct.is_pdf())
        || has_pdf_extension(&filename);

    if !is_pdf {
        let received_type = content_type
            .map(|ct| ct.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        warn!("Rejected non-PDF upload: {}", received_type);

        return Err(api_error(
            Status::BadRequest,
            "Only PDF files are supported",
            "INVALID_FORMAT",
            vec!["Upload a PDF file (.pdf)".to_string()],
        ));
    }

    let max_bytes = service.limits().max_pdf_bytes;
    if file_size > max_bytes as u64 {
        return Err(api_error(
            Status::PayloadTooLarge,
            &format!("File size exceeds the {} byte limit", max_bytes),
            "FILE_TOO_LARGE",
            vec!["Upload a smaller PDF".to_string()],
        ));
    }

    let temp_path = std::env::temp_dir().join(format!("resume_upload_{}", uuid::Uuid::new_v4()));

    if let Err(e) = upload.file.persist_to(&temp_path).await {
        error!("Failed to save uploaded file: {}", e);
        return Err(api_error(
            Status::InternalServerError,
            "Failed to process uploaded file",
            "FILE_SAVE_ERROR",
            vec!["Try uploading the file again".to_string()],
        ));
    }

    let bytes = tokio::fs::read(&temp_path).await;
    let _ = tokio::fs::remove_file(&temp_path).await;

    let bytes = match bytes {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to read uploaded file: {}", e);
            return Err(api_error(
                Status::InternalServerError,
                "Failed to process uploaded file",
                "FILE_READ_ERROR",
                vec!["Try uploading the file again".to_string()],
            ));
        }
    };

    let resume = service
        .parse_resume(bytes)
        .await
        .map_err(|e| pipeline_error(&e, "Failed to extract text from the PDF"))?;

    Ok(Json(ResumeUploadResponse {
        filename,
        extracted_length: resume.length,
        content: resume.text,
        message: "Resume uploaded and parsed successfully".to_string(),
    }))
}
