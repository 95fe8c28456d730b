use attendance_core::error::AppError;
use attendance_core::models::{NewStudent, Student, StudentPatch};
use attendance_core::traits::StudentStore;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};

/// Repository for student persistence in PostgreSQL.
#[derive(Clone)]
pub struct StudentRepository {
    pool: Pool<Postgres>,
}

impl StudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every student, oldest first.
    pub async fn get_all(&self) -> Result<Vec<Student>, AppError> {
        let rows = sqlx::query_as::<_, StudentRow>(
            r#"
            SELECT id, first_name, last_name, modified, attendance
            FROM students
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Student>, AppError> {
        let row = sqlx::query_as::<_, StudentRow>(
            r#"
            SELECT id, first_name, last_name, modified, attendance
            FROM students
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(row.map(Into::into))
    }

    /// Insert a student. Returns the stored row, including its generated id.
    pub async fn insert(&self, student: &NewStudent) -> Result<Student, AppError> {
        let row = sqlx::query_as::<_, StudentRow>(
            r#"
            INSERT INTO students (first_name, last_name, modified, attendance)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, last_name, modified, attendance
            "#,
        )
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(student.modified)
        .bind(student.attendance)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        tracing::debug!(id = row.id, "Inserted student");
        Ok(row.into())
    }

    /// Apply a partial update. Columns whose patch value is `None` keep their
    /// current value; `id` is never written.
    pub async fn update(&self, id: i32, patch: &StudentPatch) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE students
            SET
                first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                modified = COALESCE($4, modified),
                attendance = COALESCE($5, attendance)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.first_name.as_deref())
        .bind(patch.last_name.as_deref())
        .bind(patch.modified)
        .bind(patch.attendance)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query(r#"DELETE FROM students WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        tracing::debug!(id, rows = result.rows_affected(), "Deleted student");
        Ok(())
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct StudentRow {
    id: i32,
    first_name: String,
    last_name: String,
    modified: DateTime<Utc>,
    attendance: i32,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Student {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            modified: row.modified,
            attendance: row.attendance,
        }
    }
}

// -- Trait implementation --

impl StudentStore for StudentRepository {
    async fn get_all_students(&self) -> Result<Vec<Student>, AppError> {
        StudentRepository::get_all(self).await
    }

    async fn get_student_by_id(&self, id: i32) -> Result<Option<Student>, AppError> {
        StudentRepository::get_by_id(self, id).await
    }

    async fn insert_student(&self, student: &NewStudent) -> Result<Student, AppError> {
        StudentRepository::insert(self, student).await
    }

    async fn update_student(&self, id: i32, patch: &StudentPatch) -> Result<(), AppError> {
        StudentRepository::update(self, id, patch).await
    }

    async fn delete_student(&self, id: i32) -> Result<(), AppError> {
        StudentRepository::delete(self, id).await
    }

    async fn health_check(&self) -> Result<(), AppError> {
        StudentRepository::health_check(self).await
    }
}
