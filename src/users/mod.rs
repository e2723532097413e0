mod dto;
pub mod handlers;
pub mod repo;
pub(crate) mod services;

use crate::state::AppState;
use axum::Router;

pub use repo::User;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::me_routes())
}
