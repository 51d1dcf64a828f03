//! In-memory record store for the Roster employee service.
//!
//! [`EmployeeStore`] owns every employee record together with the
//! identifier counter. All operations, including paginated listing, run
//! under one exclusive lock, so each call is a single atomic
//! read-modify-write against the store state.
//!
//! # Modules
//!
//! - [`store`] -- The store itself and its CRUD operations
//! - [`page`] -- Page requests, page results, and the out-of-range error

pub mod page;
pub mod store;

pub use page::{EmployeePage, PageOutOfRange, PageRequest};
pub use store::EmployeeStore;
