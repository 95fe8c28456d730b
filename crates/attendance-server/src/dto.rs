use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use attendance_core::error::AppError;
use attendance_core::models::{NewStudent, Student, StudentPatch};
use attendance_core::sanitize::escape_markup;

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

/// A student as returned to clients. Name fields are markup-escaped.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct StudentResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub modified: DateTime<Utc>,
    pub attendance: i32,
}

impl From<Student> for StudentResponse {
    fn from(s: Student) -> Self {
        Self {
            id: s.id,
            first_name: escape_markup(&s.first_name),
            last_name: escape_markup(&s.last_name),
            modified: s.modified,
            attendance: s.attendance,
        }
    }
}

/// Body of `POST /api/students`. Every field is required; they are
/// optional here so the missing one can be named in the error.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct CreateStudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub modified: Option<DateTime<Utc>>,
    pub attendance: Option<i32>,
}

impl CreateStudentRequest {
    /// Check required fields in declaration order, failing on the first missing one.
    pub fn validate(self) -> Result<NewStudent, AppError> {
        let first_name = self
            .first_name
            .ok_or_else(|| AppError::missing_field("first_name"))?;
        let last_name = self
            .last_name
            .ok_or_else(|| AppError::missing_field("last_name"))?;
        let modified = self
            .modified
            .ok_or_else(|| AppError::missing_field("modified"))?;
        let attendance = self
            .attendance
            .ok_or_else(|| AppError::missing_field("attendance"))?;

        Ok(NewStudent {
            first_name,
            last_name,
            modified,
            attendance,
        })
    }
}

/// Body of `PATCH /api/students/{id}`.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateStudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub id: Option<i32>,
    /// Any value is accepted; a truthy one only marks the record as touched
    /// and is replaced with the server time.
    #[schema(value_type = Option<String>)]
    pub modified: Option<serde_json::Value>,
    pub attendance: Option<i32>,
}

impl UpdateStudentRequest {
    /// Keep only truthy values: non-empty strings and non-zero numbers.
    ///
    /// Falsy values are dropped, so `attendance: 0` cannot be written
    /// through PATCH. Existing clients depend on this filter. A truthy
    /// `modified` becomes `now` whatever its content.
    pub fn into_patch(self, now: DateTime<Utc>) -> StudentPatch {
        StudentPatch {
            first_name: self.first_name.filter(|s| !s.is_empty()),
            last_name: self.last_name.filter(|s| !s.is_empty()),
            id: self.id.filter(|&id| id != 0),
            modified: self.modified.filter(is_truthy).map(|_| now),
            attendance: self.attendance.filter(|&a| a != 0),
        }
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

/// The fields a PATCH wrote, echoed back. Names are always present (empty
/// when not submitted); other fields not in the update are omitted.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct StudentPatchResponse {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance: Option<i32>,
}

impl StudentPatchResponse {
    /// Serialize a patch applied to the student with `stored_id`.
    ///
    /// Ids are immutable, so a caller-supplied id is reported as the id
    /// the record actually kept.
    pub fn new(patch: StudentPatch, stored_id: i32) -> Self {
        Self {
            first_name: patch.first_name.as_deref().map(escape_markup).unwrap_or_default(),
            last_name: patch.last_name.as_deref().map(escape_markup).unwrap_or_default(),
            id: patch.id.map(|_| stored_id),
            modified: patch.modified,
            attendance: patch.attendance,
        }
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub message: String,
}

/// `{"error": {"message": "..."}}`
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                message: message.into(),
            },
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorDetail {
    pub kind: String,
}

/// Verbose server error body, only sent outside production.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ServerErrorResponse {
    pub message: String,
    pub error: ErrorDetail,
}
