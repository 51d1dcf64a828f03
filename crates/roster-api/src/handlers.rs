//! REST endpoint handlers for the Roster API.
//!
//! Each handler decodes its input, performs exactly one store operation,
//! and wraps the result in an [`Envelope`](crate::envelope::Envelope).
//! Bodies are decoded as JSON regardless of the `Content-Type` header;
//! any decode failure is a 400 and the store is not touched.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use roster_store::PageRequest;
use roster_types::{EmployeeDraft, EmployeeId};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::envelope::respond;
use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for `GET /employees`.
///
/// Kept as raw strings: a value that is missing, non-numeric, or not
/// positive falls back to the default rather than failing the request.
/// When a key repeats, its first value wins.
#[derive(Debug, Default)]
pub struct ListQuery {
    /// 1-indexed page number (default 1).
    pub page: Option<String>,
    /// Page size (default 50).
    pub limit: Option<String>,
}

impl ListQuery {
    /// Pick `page` and `limit` out of decoded query pairs.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };
        Self {
            page: first("page"),
            limit: first("limit"),
        }
    }

    /// Convert to a [`PageRequest`], applying defaults.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_raw(lenient_int(self.page.as_deref()), lenient_int(self.limit.as_deref()))
    }
}

// ---------------------------------------------------------------------------
// GET /employees -- paginated listing
// ---------------------------------------------------------------------------

/// List one page of employees sorted by id.
///
/// # Query Parameters
///
/// - `page`: 1-indexed page (default 1)
/// - `limit`: page size (default 50)
///
/// A page beyond the stored records (including page 1 of an empty store)
/// is reported as 404 `page not found`.
pub async fn list_employees(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let request = ListQuery::from_pairs(&pairs).page_request();
    let page = state.store.list_page(request).inspect_err(|e| {
        debug!(page = e.page, limit = e.limit, total = e.total, "page out of range");
    })?;

    respond(StatusCode::OK, page)
}

// ---------------------------------------------------------------------------
// POST /employees -- create one
// ---------------------------------------------------------------------------

/// Create one employee. Any `ID` in the body is ignored.
pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let draft: EmployeeDraft = decode_body(&body)?;
    let employee = state.store.create(draft);
    info!(id = %employee.id, "employee created");

    respond(StatusCode::CREATED, employee)
}

// ---------------------------------------------------------------------------
// POST /employees/batch -- create many
// ---------------------------------------------------------------------------

/// Create every employee in the body array, in order.
pub async fn batch_create_employees(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let drafts: Vec<EmployeeDraft> = decode_body(&body)?;
    let employees = state.store.batch_create(drafts);
    info!(count = employees.len(), "employee batch created");

    respond(StatusCode::OK, employees)
}

// ---------------------------------------------------------------------------
// GET /employees/{id}
// ---------------------------------------------------------------------------

/// Return a single employee.
pub async fn get_employee(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id_str)?;
    let employee = state
        .store
        .get(id)
        .ok_or(ApiError::EmployeeNotFound(id))?;

    respond(StatusCode::OK, employee)
}

// ---------------------------------------------------------------------------
// PUT /employees/{id}
// ---------------------------------------------------------------------------

/// Replace an employee's name, position, and salary.
///
/// The body is decoded before the lookup, so a malformed body is a 400
/// even when the id does not exist.
pub async fn update_employee(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let id = parse_id(&id_str)?;
    let draft: EmployeeDraft = decode_body(&body)?;
    let employee = state
        .store
        .update(id, draft)
        .ok_or(ApiError::EmployeeNotFound(id))?;
    info!(%id, "employee updated");

    respond(StatusCode::OK, employee)
}

// ---------------------------------------------------------------------------
// DELETE /employees/{id}
// ---------------------------------------------------------------------------

/// Delete an employee. Responds 204 with no body.
pub async fn delete_employee(
    State(state): State<Arc<AppState>>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id_str)?;
    if !state.store.delete(id) {
        return Err(ApiError::EmployeeNotFound(id));
    }
    info!(%id, "employee deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// Answer any unmatched path with a JSON 404.
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    ApiError::RouteNotFound(uri.path().to_owned())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an `{id}` path segment.
///
/// Only all-digit segments name an employee; anything else is an
/// unmatched route. A digit string too large for an id cannot be stored,
/// so it is simply not found.
fn parse_id(s: &str) -> Result<EmployeeId, ApiError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::RouteNotFound(format!("/employees/{s}")));
    }
    s.parse::<EmployeeId>()
        .or(Err(ApiError::EmployeeNotFound(EmployeeId(0))))
}

/// Decode a JSON request body.
fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "rejected request body");
        ApiError::InvalidBody(e.to_string())
    })
}

/// Parse an optional integer query value, treating garbage as absent.
fn lenient_int(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.parse().ok())
}
