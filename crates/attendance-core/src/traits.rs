use std::future::Future;

use crate::error::AppError;
use crate::models::{NewStudent, Student, StudentPatch};

/// Persists and retrieves student records.
///
/// Implementations own their database handle; callers receive one by
/// injection rather than looking it up from shared context.
pub trait StudentStore: Send + Sync + Clone {
    /// All students in insertion order.
    fn get_all_students(&self) -> impl Future<Output = Result<Vec<Student>, AppError>> + Send;

    /// Look up a single student. `None` if no record has this id.
    fn get_student_by_id(
        &self,
        id: i32,
    ) -> impl Future<Output = Result<Option<Student>, AppError>> + Send;

    /// Insert a student and return it with its generated id.
    fn insert_student(
        &self,
        student: &NewStudent,
    ) -> impl Future<Output = Result<Student, AppError>> + Send;

    /// Overwrite the `Some` fields of `patch` on the student with this id.
    fn update_student(
        &self,
        id: i32,
        patch: &StudentPatch,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Remove the student with this id. Missing ids are not an error.
    fn delete_student(&self, id: i32) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Check that the backing storage is reachable.
    fn health_check(&self) -> impl Future<Output = Result<(), AppError>> + Send;
}
