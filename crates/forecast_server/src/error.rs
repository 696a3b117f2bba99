//! HTTP error mapping for the forecast API.
//!
//! # Responsibility
//! - Translate core failures into status codes and JSON error bodies.
//!
//! # Invariants
//! - `NotFound` renders as a bare 404 with an empty body.
//! - Store failures are never retried; they surface as 500.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use forecast_core::db::DbError;
use forecast_core::RepoError;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use tokio::task::JoinError;

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    MalformedInput(String),
    StoreUnavailable(String),
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorPayload,
}

#[derive(Debug, Serialize)]
struct ErrorPayload {
    code: &'static str,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MalformedInput(_) => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::MalformedInput(_) => "malformed_input",
            Self::StoreUnavailable(_) => "store_unavailable",
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "forecast not found"),
            Self::MalformedInput(message) => write!(f, "malformed input: {message}"),
            Self::StoreUnavailable(message) => write!(f, "store unavailable: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = match self {
            Self::NotFound => return status.into_response(),
            Self::MalformedInput(message) | Self::StoreUnavailable(message) => message,
        };

        let payload = ErrorEnvelope {
            error: ErrorPayload { code, message },
        };
        (status, Json(payload)).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        Self::StoreUnavailable(value.to_string())
    }
}

impl From<DbError> for ApiError {
    fn from(value: DbError) -> Self {
        Self::StoreUnavailable(value.to_string())
    }
}

impl From<JoinError> for ApiError {
    fn from(value: JoinError) -> Self {
        Self::StoreUnavailable(format!("request worker failed: {value}"))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::MalformedInput(value.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::MalformedInput(value.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn taxonomy_maps_to_status_codes() {
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MalformedInput("bad".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::StoreUnavailable("down".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_response_has_no_content_type() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get("content-type").is_none());
    }

    #[test]
    fn malformed_input_response_is_json() {
        let response = ApiError::MalformedInput("bad body".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
    }
}
