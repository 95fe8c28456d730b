pub mod error;
pub mod models;
pub mod sanitize;
pub mod traits;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use error::AppError;
pub use models::{NewStudent, Student, StudentPatch};
pub use sanitize::escape_markup;
pub use traits::StudentStore;
