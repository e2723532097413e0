pub mod catalog;
pub mod handlers;
pub mod repo;

use crate::state::AppState;
use axum::Router;

pub use repo::Item;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::item_routes())
}
