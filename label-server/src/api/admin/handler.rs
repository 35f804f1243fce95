//! Part Administration Handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use shared::request::{AddPartRequest, MovePartRequest};
use shared::response::MoveResponse;
use shared::{MoveDirection, Part, PartSummary};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok_with_message};

/// POST /api/admin/parts
///
/// Creates the kit on its first part. An existing part number is
/// overwritten in place. Text is stored exactly as sent.
pub async fn add_part(
    State(state): State<ServerState>,
    user: CurrentUser,
    payload: Result<Json<AddPartRequest>, JsonRejection>,
) -> AppResult<Json<AppResponse<PartSummary>>> {
    let Json(req) = payload?;
    let kit_number = req.kit_number.as_str();
    let part_number = req.part_number.as_str();
    let description = req.description.as_str();

    state.store.add_part(kit_number, part_number, description)?;
    tracing::info!(admin = %user.username, kit = kit_number, part = part_number, "Part saved");

    let summary = PartSummary::from_part(part_number, &Part::new(part_number, description));
    Ok(ok_with_message(summary, "Part added successfully!"))
}

/// DELETE /api/admin/kits/{kit}/parts/{part}
pub async fn delete_part(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((kit_number, part_id)): Path<(String, String)>,
) -> AppResult<Json<AppResponse<Part>>> {
    let removed = state.store.delete_part(&kit_number, &part_id)?;
    tracing::info!(admin = %user.username, kit = %kit_number, part = %part_id, "Part deleted");

    Ok(ok_with_message(removed, "Part deleted successfully!"))
}

/// POST /api/admin/kits/{kit}/parts/{part}/move
///
/// Moving past either end of the kit is a no-op, reported with
/// `moved: false`.
pub async fn move_part(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path((kit_number, part_id)): Path<(String, String)>,
    payload: Result<Json<MovePartRequest>, JsonRejection>,
) -> AppResult<Json<AppResponse<MoveResponse>>> {
    let Json(req) = payload?;

    let (moved, order) = state.store.move_part(&kit_number, &part_id, req.direction)?;

    let message = match (moved, req.direction) {
        (true, direction) => format!("Part moved {}.", direction),
        (false, MoveDirection::Up) => "Part is already at the top.".to_string(),
        (false, MoveDirection::Down) => "Part is already at the bottom.".to_string(),
    };

    Ok(ok_with_message(MoveResponse { moved, order }, message))
}
