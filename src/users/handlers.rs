use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use crate::{auth::AuthIdentity, error::ApiError, state::AppState, users::repo::User};

use super::dto::PublicUser;

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, identity))]
pub async fn get_me(
    State(state): State<AppState>,
    identity: AuthIdentity,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::ensure(&state.db, &identity).await?;

    Ok(Json(PublicUser {
        id: user.id,
        name: user.name,
        email: user.email,
        current_points: user.current_points,
    }))
}
