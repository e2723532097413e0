use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::AuthIdentity,
    error::ApiError,
    points::{repo::LedgerEntry, services},
    state::AppState,
    users::User,
};

use super::dto::{AwardPointsRequest, PointsBalance};

pub fn points_routes() -> Router<AppState> {
    Router::new()
        .route("/points/balance", get(get_balance))
        .route("/points/ledger", get(list_ledger))
        .route("/points/award", post(award_points))
}

/// Current balance; an identity that has never touched the ledger reads as
/// zero without being provisioned.
#[instrument(skip(state, identity))]
pub async fn get_balance(
    State(state): State<AppState>,
    identity: AuthIdentity,
) -> Result<Json<PointsBalance>, ApiError> {
    let current_points = User::find_by_identity(&state.db, &identity)
        .await?
        .map(|u| u.current_points)
        .unwrap_or(0);
    Ok(Json(PointsBalance { current_points }))
}

#[instrument(skip(state, identity))]
pub async fn list_ledger(
    State(state): State<AppState>,
    identity: AuthIdentity,
) -> Result<Json<Vec<LedgerEntry>>, ApiError> {
    let Some(user) = User::find_by_identity(&state.db, &identity).await? else {
        return Ok(Json(Vec::new()));
    };
    let entries = LedgerEntry::list_by_user(&state.db, user.id).await?;
    Ok(Json(entries))
}

/// Credits points to the calling identity, provisioning the user on first
/// sight. Used by the receipt-scan flow with a deterministic point value.
#[instrument(skip(state, identity, body))]
pub async fn award_points(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Json(body): Json<AwardPointsRequest>,
) -> Result<Json<PointsBalance>, ApiError> {
    let user = User::ensure(&state.db, &identity).await?;
    let reason = body.reason.as_deref().unwrap_or("Checkout");

    let mut tx = state.db.begin().await?;
    let current_points = services::credit(&mut tx, user.id, body.points, reason).await?;
    tx.commit().await?;

    Ok(Json(PointsBalance { current_points }))
}
