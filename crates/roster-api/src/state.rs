//! Shared application state for the Roster API.

use std::sync::Arc;

use roster_store::EmployeeStore;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. The
/// store does its own locking, so the state itself needs none.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The process-wide employee store.
    pub store: Arc<EmployeeStore>,
}

impl AppState {
    /// Create application state around a fresh, empty store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(EmployeeStore::new()))
    }

    /// Create application state around an existing store.
    pub const fn with_store(store: Arc<EmployeeStore>) -> Self {
        Self { store }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
