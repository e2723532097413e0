use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::AuthIdentity,
    cart::{repo, services},
    error::ApiError,
    items::Item,
    state::AppState,
    users::User,
};

use super::dto::{
    AddToCartRequest, CheckoutResponse, ClearCartResponse, RemoveItemResponse,
    UpdateQuantityRequest,
};
use super::repo::CartLine;

pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(get_cart).delete(clear_cart))
        .route("/cart/items", post(add_to_cart))
        .route(
            "/cart/items/:item_id",
            delete(remove_cart_item).patch(update_cart_item_quantity),
        )
        .route("/cart/checkout", post(checkout_cart))
}

#[instrument(skip(state, identity))]
pub async fn get_cart(
    State(state): State<AppState>,
    identity: AuthIdentity,
) -> Result<Json<Vec<CartLine>>, ApiError> {
    let Some(user) = User::find_by_identity(&state.db, &identity).await? else {
        return Ok(Json(Vec::new()));
    };
    let lines = repo::lines_for_user(&state.db, user.id).await?;
    Ok(Json(lines))
}

#[instrument(skip(state, identity, body))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Json(body): Json<AddToCartRequest>,
) -> Result<Json<Uuid>, ApiError> {
    if body.quantity <= 0 {
        return Err(ApiError::InvalidArgument(
            "Quantity must be greater than zero".into(),
        ));
    }

    let user = User::ensure(&state.db, &identity).await?;
    if Item::find_by_id(&state.db, body.item_id).await?.is_none() {
        return Err(ApiError::NotFound("Item"));
    }

    let cart_id = repo::add_quantity(&state.db, user.id, body.item_id, body.quantity).await?;
    Ok(Json(cart_id))
}

#[instrument(skip(state, identity, body))]
pub async fn update_cart_item_quantity(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Path(item_id): Path<Uuid>,
    Json(body): Json<UpdateQuantityRequest>,
) -> Result<Json<Uuid>, ApiError> {
    let user = User::ensure(&state.db, &identity).await?;
    let cart_id = repo::set_quantity(&state.db, user.id, item_id, body.quantity).await?;
    Ok(Json(cart_id))
}

#[instrument(skip(state, identity))]
pub async fn remove_cart_item(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Path(item_id): Path<Uuid>,
) -> Result<Json<RemoveItemResponse>, ApiError> {
    let user = User::ensure(&state.db, &identity).await?;
    let removed = repo::remove(&state.db, user.id, item_id).await?;
    Ok(Json(RemoveItemResponse { removed }))
}

#[instrument(skip(state, identity))]
pub async fn clear_cart(
    State(state): State<AppState>,
    identity: AuthIdentity,
) -> Result<Json<ClearCartResponse>, ApiError> {
    let user = User::ensure(&state.db, &identity).await?;
    let removed = repo::clear(&state.db, user.id).await?;
    Ok(Json(ClearCartResponse { removed }))
}

/// Checks out the whole basket in one step. Any failure rolls everything
/// back; on success the basket is empty and the earned points are on the
/// balance with a single "Checkout" ledger entry.
#[instrument(skip(state, identity))]
pub async fn checkout_cart(
    State(state): State<AppState>,
    identity: AuthIdentity,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let user = User::ensure(&state.db, &identity).await?;
    let summary = services::checkout(&state.db, user.id).await?;
    Ok(Json(CheckoutResponse {
        total_points: summary.total_points,
        total_amount: summary.total_amount,
    }))
}
