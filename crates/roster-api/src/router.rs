//! Axum router construction for the Roster API.
//!
//! Assembles the employee routes into a single [`Router`] with CORS and
//! request tracing middleware.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /employees` -- paginated listing
/// - `POST /employees` -- create one
/// - `POST /employees/batch` -- create many
/// - `GET /employees/{id}` -- fetch one
/// - `PUT /employees/{id}` -- update one
/// - `DELETE /employees/{id}` -- delete one
///
/// CORS allows any origin, matching the `*` origin sent on every
/// success response. Request bodies are not size-limited, so a batch of
/// any length is accepted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/employees",
            get(handlers::list_employees).post(handlers::create_employee),
        )
        .route("/employees/batch", post(handlers::batch_create_employees))
        .route(
            "/employees/{id}",
            get(handlers::get_employee)
                .put(handlers::update_employee)
                .delete(handlers::delete_employee),
        )
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
