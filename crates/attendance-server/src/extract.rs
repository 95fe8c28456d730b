use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use serde::de::DeserializeOwned;

use attendance_core::{AppError, Student, StudentStore};

use crate::error::ApiError;
use crate::state::AppState;

/// The student addressed by the `{id}` path segment.
///
/// Runs before any item handler and before the request body is read: an id
/// that does not parse or does not exist short-circuits with 404.
pub struct FoundStudent(pub Student);

impl<S: StudentStore> FromRequestParts<Arc<AppState<S>>> for FoundStudent {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState<S>>,
    ) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::student_not_found())?;

        let id = parse_student_id(&raw).ok_or_else(AppError::student_not_found)?;

        let student = state
            .store
            .get_student_by_id(id)
            .await?
            .ok_or_else(AppError::student_not_found)?;

        Ok(Self(student))
    }
}

/// Parse a path id. Integral numeric forms such as `1.0` or `1e0` address
/// the same record as `1`.
fn parse_student_id(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<i32>() {
        return Some(id);
    }

    let value: f64 = raw.parse().ok()?;
    let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    (value.is_finite() && value.fract() == 0.0 && in_range).then_some(value as i32)
}

/// A JSON request body.
///
/// A request without a JSON content type, or with an empty body, yields
/// `T::default()` so the handler's own validation names what is missing.
/// A malformed JSON body is a validation error.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes)
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        Ok(Self(value))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
