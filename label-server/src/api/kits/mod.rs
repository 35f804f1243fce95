//! Kit Routes

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Kit query router - public
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/kits", get(handler::list))
        .route("/api/kits/{kit}", get(handler::get_by_kit))
}
