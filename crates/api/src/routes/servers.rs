//! Route definitions for the server inventory, mounted at `/servers`.
//!
//! ```text
//! GET    /         -> list_servers
//! POST   /         -> submit_server
//! DELETE /         -> clear_servers
//! POST   /import   -> import_servers
//! DELETE /{name}   -> delete_server
//! ```

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{import, servers};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(servers::list_servers)
                .post(servers::submit_server)
                .delete(servers::clear_servers),
        )
        .route("/import", post(import::import_servers))
        .route("/{name}", delete(servers::delete_server))
}
