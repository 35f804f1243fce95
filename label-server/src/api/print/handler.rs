//! Print Handler

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use shared::request::PrintRequest;
use shared::response::PrintResponse;

use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok_with_message};

/// POST /api/print
///
/// Without `part_numbers` the whole kit is printed.
pub async fn print(
    State(state): State<ServerState>,
    payload: Result<Json<PrintRequest>, JsonRejection>,
) -> AppResult<Json<AppResponse<PrintResponse>>> {
    let Json(req) = payload?;

    let result = state
        .print_service
        .print(&req.kit_number, req.part_numbers.as_deref())
        .await?;

    let message = result.message.clone();
    Ok(ok_with_message(result, message))
}
