use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::AuthIdentity,
    error::ApiError,
    rewards::{
        repo::{RedeemedReward, Reward},
        services,
    },
    state::AppState,
    users::User,
};

use super::dto::{MarkUsedResponse, RedeemResponse};

pub fn reward_routes() -> Router<AppState> {
    Router::new()
        .route("/rewards", get(list_rewards))
        .route("/rewards/:id/redeem", post(redeem_reward))
        .route("/me/rewards", get(list_my_rewards))
        .route("/me/rewards/:id/use", post(mark_reward_used))
}

#[instrument(skip(state))]
pub async fn list_rewards(State(state): State<AppState>) -> Result<Json<Vec<Reward>>, ApiError> {
    let rewards = Reward::list(&state.db).await?;
    Ok(Json(rewards))
}

#[instrument(skip(state, identity))]
pub async fn redeem_reward(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Path(reward_id): Path<Uuid>,
) -> Result<Json<RedeemResponse>, ApiError> {
    let user = User::ensure(&state.db, &identity).await?;
    let remaining_points = services::redeem(&state.db, user.id, reward_id).await?;
    Ok(Json(RedeemResponse { remaining_points }))
}

#[instrument(skip(state, identity))]
pub async fn list_my_rewards(
    State(state): State<AppState>,
    identity: AuthIdentity,
) -> Result<Json<Vec<RedeemedReward>>, ApiError> {
    let Some(user) = User::find_by_identity(&state.db, &identity).await? else {
        return Ok(Json(Vec::new()));
    };
    let redemptions = RedeemedReward::list_by_user(&state.db, user.id).await?;
    Ok(Json(redemptions))
}

#[instrument(skip(state, identity))]
pub async fn mark_reward_used(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Path(redemption_id): Path<Uuid>,
) -> Result<Json<MarkUsedResponse>, ApiError> {
    let user = User::find_by_identity(&state.db, &identity)
        .await?
        .ok_or(ApiError::NotFound("User"))?;
    let used_at = services::mark_used(&state.db, redemption_id, user.id).await?;
    Ok(Json(MarkUsedResponse { used_at }))
}
