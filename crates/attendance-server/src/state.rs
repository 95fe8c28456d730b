use attendance_core::StudentStore;

use crate::config::Environment;

/// Shared application state, available to all route handlers via `State<Arc<AppState<S>>>`.
pub struct AppState<S: StudentStore> {
    pub store: S,
    pub environment: Environment,
}

impl<S: StudentStore> AppState<S> {
    pub fn new(store: S, environment: Environment) -> Self {
        Self { store, environment }
    }
}
