mod dto;
pub mod flow;
pub mod handlers;
pub mod repo;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use flow::{PaymentFlow, PaymentMethod, PaymentOutcome, PaymentStep};
pub use repo::CartLine;
pub use services::{compute_totals, CartTotals};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::cart_routes())
}
