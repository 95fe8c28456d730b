use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use attendance_core::error::AppError;

use crate::dto::ErrorResponse;

/// Generic message sent for server errors in production.
pub const SERVER_ERROR_MESSAGE: &str = "server error";

/// Wrapper so we can implement `IntoResponse` for `AppError`.
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Details of a server error, attached to the response extensions so that
/// [`crate::layers::render_server_errors`] can pick the body for the environment.
#[derive(Debug, Clone)]
pub struct ServerFault {
    pub kind: &'static str,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if self.0.is_client_error() {
            return (status, axum::Json(ErrorResponse::new(self.0.to_string()))).into_response();
        }

        tracing::error!(kind = self.0.kind(), error = %self.0, "Request failed");

        let mut response = (status, axum::Json(ErrorResponse::new(SERVER_ERROR_MESSAGE)))
            .into_response();
        response.extensions_mut().insert(ServerFault {
            kind: self.0.kind(),
            message: self.0.to_string(),
        });
        response
    }
}
