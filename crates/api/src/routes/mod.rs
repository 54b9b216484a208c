//! Route definitions, grouped per resource.
//!
//! [`api_routes`] assembles everything mounted under `/api/v1`; the
//! health check router is mounted separately at the root.

use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod servers;

/// All routes mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/servers", servers::router())
}
