//! Print Routes

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Print router - public, operators do not log in
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/print", post(handler::print))
}
