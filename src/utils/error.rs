use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Every failure a request can end in, plus startup configuration errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized access")]
    Unauthenticated,

    #[error("forbidden access!")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message safe to hand back to the caller. Server-side detail stays in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Unauthenticated | AppError::Forbidden | AppError::NotFound(_) => {
                self.to_string()
            }
            AppError::InvalidRequest(msg) => msg.clone(),
            _ => "Internal server error".to_string(),
        }
    }

    fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("❌ {} ({})", self, status.as_u16());
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            log::warn!("🚫 {} ({})", self, status.as_u16());
        } else {
            log::debug!("{} ({})", self, status.as_u16());
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_)
            | AppError::Token(_)
            | AppError::Config(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.log();
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": true,
            "message": self.user_message()
        }))
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(e: mongodb::bson::ser::Error) -> Self {
        AppError::InvalidRequest(format!("Unsupported document value: {}", e))
    }
}
