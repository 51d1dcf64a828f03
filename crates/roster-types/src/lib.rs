//! Shared type definitions for the Roster employee service.
//!
//! Types defined here are used by the record store and the HTTP layer
//! alike, so the wire encoding of an employee lives in exactly one place.
//!
//! # Modules
//!
//! - [`ids`] -- The store-assigned employee identifier
//! - [`structs`] -- Employee records and client-supplied drafts

pub mod ids;
pub mod structs;

pub use ids::EmployeeId;
pub use structs::{Employee, EmployeeDraft};
