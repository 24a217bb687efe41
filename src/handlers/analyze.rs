use std::str::FromStr;
use std::time::Instant;

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    response::Json,
};
use tracing::{error, info};

use crate::error::{AppError, AppResult};
use crate::models::{
    AnalysisMode, AnalysisResult, AnalyzeResponse, AnalyzeTextRequest, UploadedDocument,
};
use crate::state::AppState;

/// `POST /analyze` — accepts either a multipart upload (`file` plus optional
/// `mode` and `user_description` fields) or a JSON body with a `resume` text
/// field, and returns `{"analysis": ...}`.
pub async fn analyze_handler(
    State(state): State<AppState>,
    req: Request,
) -> AppResult<Json<AnalyzeResponse>> {
    let start = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string()[..8].to_string();

    info!(request_id = %request_id, "Starting resume analysis request");

    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("")
        .to_string();

    let result = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| AppError::bad_upload(e.body_text()))?;
        analyze_multipart(&state, &request_id, multipart).await
    } else if content_type.starts_with("application/json") {
        let Json(body) = Json::<AnalyzeTextRequest>::from_request(req, &())
            .await
            .map_err(|e| AppError::bad_upload(e.body_text()))?;
        analyze_text_body(&state, &request_id, body).await
    } else {
        Err(AppError::MissingDocument)
    };

    match result {
        Ok(analysis) => {
            info!(
                request_id = %request_id,
                total_time_ms = start.elapsed().as_millis() as u64,
                "Analysis completed successfully"
            );
            Ok(Json(AnalyzeResponse::new(analysis)))
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "Analysis request failed");
            Err(e)
        }
    }
}

async fn analyze_multipart(
    state: &AppState,
    request_id: &str,
    mut multipart: Multipart,
) -> AppResult<AnalysisResult> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut resume_text: Option<String> = None;
    let mut mode_field: Option<String> = None;
    let mut user_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_upload(format!("Failed to read multipart field: {}", e)))?
    {
        match field.name().unwrap_or("") {
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::bad_upload(format!("Failed to read file data: {}", e)))?;
                file = Some((file_name, data.to_vec()));
            }
            "resume" => {
                resume_text = Some(read_text_field(field).await?);
            }
            "mode" => {
                mode_field = Some(read_text_field(field).await?);
            }
            "user_description" => {
                user_description = Some(read_text_field(field).await?);
            }
            _ => {}
        }
    }

    let mode = parse_mode(mode_field.as_deref())?;

    if let Some((name, data)) = file {
        info!(
            request_id = %request_id,
            file_name = %name,
            file_size = data.len(),
            mode = ?mode,
            "Analyzing uploaded file"
        );
        let document = UploadedDocument::new(name, data);
        state
            .analyzer
            .analyze_document(&document, mode, user_description.as_deref())
            .await
    } else if let Some(text) = resume_text {
        state
            .analyzer
            .analyze_text(&text, mode, user_description.as_deref())
            .await
    } else {
        Err(AppError::MissingDocument)
    }
}

async fn analyze_text_body(
    state: &AppState,
    request_id: &str,
    body: AnalyzeTextRequest,
) -> AppResult<AnalysisResult> {
    let mode = parse_mode(body.mode.as_deref())?;

    info!(
        request_id = %request_id,
        chars = body.resume.len(),
        mode = ?mode,
        "Analyzing raw resume text"
    );

    state
        .analyzer
        .analyze_text(&body.resume, mode, body.user_description.as_deref())
        .await
}

fn parse_mode(mode: Option<&str>) -> AppResult<AnalysisMode> {
    match mode {
        None => Ok(AnalysisMode::default()),
        Some(s) if s.trim().is_empty() => Ok(AnalysisMode::default()),
        Some(s) => AnalysisMode::from_str(s).map_err(AppError::InvalidMode),
    }
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::bad_upload(format!("Failed to read form field: {}", e)))
}
