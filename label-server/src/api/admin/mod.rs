//! Part Administration Routes
//!
//! Every handler takes a [`crate::auth::CurrentUser`], so all routes here
//! require an admin bearer token.

mod handler;

use axum::{
    Router,
    routing::{delete, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/parts", post(handler::add_part))
        .route(
            "/api/admin/kits/{kit}/parts/{part}",
            delete(handler::delete_part),
        )
        .route(
            "/api/admin/kits/{kit}/parts/{part}/move",
            post(handler::move_part),
        )
}
