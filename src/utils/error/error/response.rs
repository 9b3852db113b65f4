//! HTTP response handling for errors

use super::types::TelemetryError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

impl ResponseError for TelemetryError {
    fn status_code(&self) -> StatusCode {
        match self {
            TelemetryError::Validation(_) | TelemetryError::Signature(_) => StatusCode::BAD_REQUEST,
            TelemetryError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            TelemetryError::Validation(_) => ("VALIDATION_ERROR", self.to_string()),
            TelemetryError::NotFound(_) => ("NOT_FOUND", self.to_string()),
            TelemetryError::Signature(_) => ("SIGNATURE_MISMATCH", self.to_string()),
            TelemetryError::Database(_) | TelemetryError::RetryExhausted { .. } => (
                "DATABASE_ERROR",
                "Database operation failed".to_string(),
            ),
            TelemetryError::Storage(_) | TelemetryError::Io(_) => {
                ("STORAGE_ERROR", "Storage operation failed".to_string())
            }
            TelemetryError::Serialization(_) | TelemetryError::Yaml(_) => {
                ("SERIALIZATION_ERROR", self.to_string())
            }
            _ => ("INTERNAL_ERROR", "Internal server error".to_string()),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Standard error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}
