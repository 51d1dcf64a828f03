//! Error types for the Roster API layer.
//!
//! [`ApiError`] covers every way a request can fail and converts into an
//! HTTP response via its [`IntoResponse`] implementation. None of these
//! leave the store modified.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roster_store::PageOutOfRange;
use roster_types::EmployeeId;

/// Errors that can occur while handling an API request.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body could not be decoded.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// No employee is stored under the requested id.
    #[error("employee not found")]
    EmployeeNotFound(EmployeeId),

    /// The requested page lies beyond the stored records.
    #[error("page not found")]
    PageNotFound(#[from] PageOutOfRange),

    /// No route matches the request path.
    #[error("not found: {0}")]
    RouteNotFound(String),

    /// A response payload could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// The HTTP status this error is reported with.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::EmployeeNotFound(_) | Self::PageNotFound(_) | Self::RouteNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
