use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student Attendance API",
        version = "0.1.0",
        description = "Create, read, update, and delete student attendance records."
    ),
    paths(
        crate::routes::list_students,
        crate::routes::create_student,
        crate::routes::get_student,
        crate::routes::update_student,
        crate::routes::delete_student,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::StudentResponse,
        crate::dto::CreateStudentRequest,
        crate::dto::UpdateStudentRequest,
        crate::dto::StudentPatchResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
        crate::dto::ErrorBody,
        crate::dto::ServerErrorResponse,
        crate::dto::ErrorDetail,
    )),
    tags(
        (name = "students", description = "Student attendance records"),
        (name = "system", description = "Health and system status"),
    )
)]
pub struct ApiDoc;
