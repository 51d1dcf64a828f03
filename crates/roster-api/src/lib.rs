//! HTTP request layer for the Roster employee service.
//!
//! This crate maps REST calls onto the [`EmployeeStore`] operations and
//! wraps every successful result in the JSON response [`Envelope`]:
//!
//! | Method | Path | Store operation |
//! |--------|------|-----------------|
//! | `GET` | `/employees?page=&limit=` | `list_page` |
//! | `POST` | `/employees` | `create` |
//! | `POST` | `/employees/batch` | `batch_create` |
//! | `GET` | `/employees/{id}` | `get` |
//! | `PUT` | `/employees/{id}` | `update` |
//! | `DELETE` | `/employees/{id}` | `delete` |
//!
//! The store is the only shared state. Handlers never hold its lock
//! across an `.await`; each call is one synchronous store operation.
//!
//! [`EmployeeStore`]: roster_store::EmployeeStore
//! [`Envelope`]: envelope::Envelope

pub mod envelope;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{serve, start_server, ServerConfig, ServerError};
pub use state::AppState;
