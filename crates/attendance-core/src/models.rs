use chrono::{DateTime, Utc};

/// A persisted student attendance record.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Student {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Last time the record was written
    pub modified: DateTime<Utc>,
    pub attendance: i32,
}

/// DTO for inserting a new student. Every column except `id` is required.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub modified: DateTime<Utc>,
    pub attendance: i32,
}

impl NewStudent {
    /// Attach a database-assigned id.
    pub fn into_student(self, id: i32) -> Student {
        Student {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            modified: self.modified,
            attendance: self.attendance,
        }
    }
}

/// Partial update of a student. Only `Some` fields are written.
///
/// `id` is carried so that a patch naming only the id still counts as
/// non-empty, but stores never write it: ids are immutable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub id: Option<i32>,
    pub modified: Option<DateTime<Utc>>,
    pub attendance: Option<i32>,
}

impl StudentPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.id.is_none()
            && self.modified.is_none()
            && self.attendance.is_none()
    }

    /// Overwrite `modified` with the given server time.
    pub fn stamped(mut self, now: DateTime<Utc>) -> Self {
        self.modified = Some(now);
        self
    }

    /// Apply this patch to a record in place. `id` is left untouched.
    pub fn apply_to(&self, student: &mut Student) {
        if let Some(first_name) = &self.first_name {
            student.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            student.last_name = last_name.clone();
        }
        if let Some(modified) = self.modified {
            student.modified = modified;
        }
        if let Some(attendance) = self.attendance {
            student.attendance = attendance;
        }
    }
}
