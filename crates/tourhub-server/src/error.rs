//! Translation of domain errors into HTTP responses.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tourhub_auth::AuthError;
use tourhub_core::error::TourError;
use tracing::error;

/// Error returned by every handler and extractor.
///
/// Renders as `{"error": true, "message": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub TourError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TourError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            TourError::AuthorizationDenied { .. } => StatusCode::FORBIDDEN,
            TourError::Validation { .. } => StatusCode::BAD_REQUEST,
            TourError::NotFound { .. } => StatusCode::NOT_FOUND,
            TourError::AlreadyExists { .. } => StatusCode::CONFLICT,
            TourError::Database(_) | TourError::Crypto(_) | TourError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<TourError> for ApiError {
    fn from(e: TourError) -> Self {
        Self(e)
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        Self(e.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(TourError::validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(TourError::validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(TourError::validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();
        if status.is_server_error() {
            error!(error = %message, "Request failed");
        }

        (status, Json(json!({ "error": true, "message": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
