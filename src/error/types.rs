use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("DOC format is not supported. Please convert to DOCX or PDF.")]
    DocFormatNotSupported,

    #[error("Unsupported file format")]
    UnsupportedFormat,

    #[error("No resume text or file provided")]
    MissingDocument,

    #[error("Empty file uploaded")]
    EmptyFile,

    #[error("Could not extract text from the provided file")]
    UnreadableDocument,

    #[error("Invalid mode '{0}': expected one of genuine, roast, both")]
    InvalidMode(String),

    #[error("Failed to read upload: {message}")]
    BadUpload { message: String },

    #[error("Text extraction failed: {message}")]
    ExtractionError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::DocFormatNotSupported => "DOC_FORMAT_NOT_SUPPORTED",
            AppError::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            AppError::MissingDocument => "MISSING_DOCUMENT",
            AppError::EmptyFile => "EMPTY_FILE",
            AppError::UnreadableDocument => "UNREADABLE_DOCUMENT",
            AppError::InvalidMode(_) => "INVALID_MODE",
            AppError::BadUpload { .. } => "BAD_UPLOAD",
            AppError::ExtractionError { .. } => "EXTRACTION_ERROR",
            AppError::ConfigError { .. } => "CONFIG_ERROR",
            AppError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DocFormatNotSupported => StatusCode::BAD_REQUEST,
            AppError::UnsupportedFormat => StatusCode::BAD_REQUEST,
            AppError::MissingDocument => StatusCode::BAD_REQUEST,
            AppError::EmptyFile => StatusCode::BAD_REQUEST,
            AppError::UnreadableDocument => StatusCode::BAD_REQUEST,
            AppError::InvalidMode(_) => StatusCode::BAD_REQUEST,
            AppError::BadUpload { .. } => StatusCode::BAD_REQUEST,
            AppError::ExtractionError { .. } => StatusCode::BAD_REQUEST,
            AppError::ConfigError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        tracing::error!(
            error_code = error_code,
            status_code = %status,
            error_message = %message,
            "Request failed"
        );

        // Wire contract: a flat {"error": message} body with 400/500 status.
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

// Convert common errors to AppError
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: format!("IO error: {}", err),
        }
    }
}

// Helper methods for creating specific errors
impl AppError {
    pub fn extraction(message: impl Into<String>) -> Self {
        AppError::ExtractionError {
            message: message.into(),
        }
    }

    pub fn bad_upload(message: impl Into<String>) -> Self {
        AppError::BadUpload {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        AppError::ConfigError {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal {
            message: message.into(),
        }
    }
}
