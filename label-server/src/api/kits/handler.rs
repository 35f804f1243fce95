//! Kit Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::response::KitResponse;
use shared::{Catalog, PartSummary};

use crate::core::ServerState;
use crate::utils::{AppResponse, AppResult, ok};

/// GET /api/kits - the whole catalog, in file order
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<AppResponse<Catalog>>> {
    let catalog = state.store.load()?;
    Ok(ok(catalog))
}

/// GET /api/kits/{kit} - one kit's parts with truncated descriptions
pub async fn get_by_kit(
    State(state): State<ServerState>,
    Path(kit_number): Path<String>,
) -> AppResult<Json<AppResponse<KitResponse>>> {
    let kit = state.store.kit(&kit_number)?;

    let parts = kit
        .iter()
        .map(|(id, part)| PartSummary::from_part(id, part))
        .collect();

    Ok(ok(KitResponse { kit_number, parts }))
}
