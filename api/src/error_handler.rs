use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use completion_client::CompletionError;
use prompt_router::RouterError;
use thiserror::Error;
use tracing::{error, warn};

use crate::core::http::error_body::{ErrorBody, ErrorDetail};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / IO ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("not found")]
    NotFound,

    // --- Completion backend (also covers startup config) ---
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

impl From<RouterError> for AppError {
    fn from(err: RouterError) -> Self {
        match err {
            RouterError::MissingField(path) => AppError::MissingField(path),
            RouterError::Completion(e) => AppError::Completion(e),
        }
    }
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingField(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Bind(_) | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Completion(e) => match e {
                CompletionError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
                e if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::BAD_GATEWAY,
            },
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::MissingField(_) => "MISSING_FIELD",
            AppError::NotFound => "NOT_FOUND",
            AppError::Completion(e) => match e {
                CompletionError::Config(_) => "CONFIG_ERROR",
                CompletionError::Http(_) => "UPSTREAM_HTTP_ERROR",
                CompletionError::MalformedResponse(_) => "UPSTREAM_MALFORMED_RESPONSE",
                e if e.is_timeout() => "UPSTREAM_TIMEOUT",
                _ => "UPSTREAM_UNREACHABLE",
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if status.is_server_error() {
            error!(%status, code, error = %self, "request failed");
        } else {
            warn!(%status, code, error = %self, "request rejected");
        }

        let mut body = ErrorBody::new(code, self.to_string());
        if let AppError::MissingField(path) = &self {
            body = body.with_detail(ErrorDetail {
                path: Some((*path).to_string()),
                hint: Some(r#"Expected { "data": { "prompt": "...", "role": "..." } }."#.into()),
            });
        }
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;
