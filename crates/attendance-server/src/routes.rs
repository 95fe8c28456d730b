use std::sync::Arc;

use axum::Router;
use axum::extract::{OriginalUri, State};
use axum::http::{StatusCode, header};
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use chrono::Utc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use attendance_core::{AppError, StudentStore};

use crate::dto::{
    CreateStudentRequest, HealthResponse, StudentPatchResponse, StudentResponse,
    UpdateStudentRequest,
};
use crate::error::ApiError;
use crate::extract::{FoundStudent, JsonBody};
use crate::layers::render_server_errors;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Message for a PATCH body that would not change anything.
pub const EMPTY_PATCH_MESSAGE: &str =
    "Request body must contain either 'first_name, last_name, id, modified, or attendance'";

/// Build the full router with all routes and middleware.
pub fn router<S: StudentStore + 'static>(state: Arc<AppState<S>>) -> Router {
    let students: Router<Arc<AppState<S>>> = Router::new()
        .route(
            "/api/students",
            get(list_students::<S>).post(create_student::<S>),
        )
        .route(
            "/api/students/",
            get(list_students::<S>).post(create_student::<S>),
        )
        .route(
            "/api/students/{id}",
            get(get_student)
                .patch(update_student::<S>)
                .delete(delete_student::<S>),
        );

    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health::<S>))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public
        .merge(students)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            render_server_errors::<S>,
        ))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "All students", body = [StudentResponse]),
        (status = 500, description = "Server error", body = crate::dto::ErrorResponse),
    ),
    tag = "students"
)]
pub async fn list_students<S: StudentStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<impl IntoResponse, ApiError> {
    let students = state.store.get_all_students().await?;

    let response: Vec<StudentResponse> =
        students.into_iter().map(StudentResponse::from).collect();

    Ok(axum::Json(response))
}

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = StudentResponse,
            headers(("location" = String, description = "URL of the new student"))),
        (status = 400, description = "Missing field", body = crate::dto::ErrorResponse),
    ),
    tag = "students"
)]
pub async fn create_student<S: StudentStore>(
    State(state): State<Arc<AppState<S>>>,
    OriginalUri(uri): OriginalUri,
    JsonBody(request): JsonBody<CreateStudentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_student = request.validate()?;

    let student = state.store.insert_student(&new_student).await?;
    tracing::info!(id = student.id, "Student created");

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), student.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        axum::Json(StudentResponse::from(student)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student details", body = StudentResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "students"
)]
pub async fn get_student(
    FoundStudent(student): FoundStudent,
) -> Result<impl IntoResponse, ApiError> {
    Ok(axum::Json(StudentResponse::from(student)))
}

#[utoipa::path(
    patch,
    path = "/api/students/{id}",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Fields written", body = StudentPatchResponse),
        (status = 400, description = "Nothing to update", body = crate::dto::ErrorResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "students"
)]
pub async fn update_student<S: StudentStore>(
    State(state): State<Arc<AppState<S>>>,
    FoundStudent(student): FoundStudent,
    JsonBody(request): JsonBody<UpdateStudentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let now = Utc::now();
    let patch = request.into_patch(now);
    if patch.is_empty() {
        return Err(AppError::Validation(EMPTY_PATCH_MESSAGE.into()).into());
    }

    let patch = patch.stamped(now);
    state.store.update_student(student.id, &patch).await?;

    Ok(axum::Json(StudentPatchResponse::new(patch, student.id)))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse),
    ),
    tag = "students"
)]
pub async fn delete_student<S: StudentStore>(
    State(state): State<Arc<AppState<S>>>,
    FoundStudent(student): FoundStudent,
) -> Result<impl IntoResponse, ApiError> {
    state.store.delete_student(student.id).await?;
    tracing::info!(id = student.id, "Student deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

pub async fn root() -> &'static str {
    "Hello, world!"
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health<S: StudentStore>(
    State(state): State<Arc<AppState<S>>>,
) -> impl IntoResponse {
    let healthy = state.store.health_check().await.is_ok();

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" },
        database: if healthy { "ok" } else { "error" },
    };

    (status, axum::Json(response))
}
