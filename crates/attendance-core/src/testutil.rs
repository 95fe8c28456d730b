//! Test utilities: an in-memory [`StudentStore`].
//!
//! Handwritten fake for dependency injection in router tests.
//! State lives behind `Arc<Mutex<_>>` so clones share the same rows,
//! allowing assertions on what a request persisted.

use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::{NewStudent, Student, StudentPatch};
use crate::traits::StudentStore;

#[derive(Default)]
struct Rows {
    students: Vec<Student>,
    last_id: i32,
}

/// In-memory store with sequential ids, mirroring a `SERIAL` column.
#[derive(Clone, Default)]
pub struct MemoryStudentStore {
    rows: Arc<Mutex<Rows>>,
    /// When set, every operation fails with a database error carrying this message.
    failure: Arc<Mutex<Option<String>>>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given students.
    pub fn with_students(students: Vec<NewStudent>) -> Self {
        let store = Self::new();
        {
            let mut rows = store.rows.lock().unwrap();
            for student in students {
                rows.last_id += 1;
                let id = rows.last_id;
                rows.students.push(student.into_student(id));
            }
        }
        store
    }

    /// Create a store whose every operation fails.
    pub fn failing(message: &str) -> Self {
        let store = Self::new();
        *store.failure.lock().unwrap() = Some(message.to_string());
        store
    }

    /// Snapshot of a stored row, bypassing the failure switch.
    pub fn get(&self, id: i32) -> Option<Student> {
        let rows = self.rows.lock().unwrap();
        rows.students.iter().find(|s| s.id == id).cloned()
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self) -> Result<(), AppError> {
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(AppError::DatabaseError(message.clone())),
            None => Ok(()),
        }
    }
}

impl StudentStore for MemoryStudentStore {
    async fn get_all_students(&self) -> Result<Vec<Student>, AppError> {
        self.check()?;
        Ok(self.rows.lock().unwrap().students.clone())
    }

    async fn get_student_by_id(&self, id: i32) -> Result<Option<Student>, AppError> {
        self.check()?;
        Ok(self.get(id))
    }

    async fn insert_student(&self, student: &NewStudent) -> Result<Student, AppError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        rows.last_id += 1;
        let created = student.clone().into_student(rows.last_id);
        rows.students.push(created.clone());
        Ok(created)
    }

    async fn update_student(&self, id: i32, patch: &StudentPatch) -> Result<(), AppError> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if let Some(student) = rows.students.iter_mut().find(|s| s.id == id) {
            patch.apply_to(student);
        }
        Ok(())
    }

    async fn delete_student(&self, id: i32) -> Result<(), AppError> {
        self.check()?;
        self.rows.lock().unwrap().students.retain(|s| s.id != id);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.check()
    }
}
