use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use crate::{error::ApiError, scan::barcode, state::AppState};

use super::repo::Item;

pub fn item_routes() -> Router<AppState> {
    Router::new().route("/items/:barcode", get(get_item_by_barcode))
}

/// Returns the catalog item for a barcode, or JSON `null` when the barcode
/// is unknown. Malformed barcodes are rejected before the lookup.
#[instrument(skip(state))]
pub async fn get_item_by_barcode(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<Option<Item>>, ApiError> {
    let barcode = barcode::parse(&raw).map_err(|e| ApiError::InvalidArgument(e.to_string()))?;
    let item = Item::find_by_barcode(&state.db, barcode).await?;
    Ok(Json(item))
}
