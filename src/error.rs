use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Application-level error type. Every handler returns `Result<T, ApiError>`
/// and the variant decides the HTTP status; messages are surfaced to the
/// client verbatim except for internal failures.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Referenced entity does not exist ("User", "Item", "Reward", "Cart item").
    #[error("{0} not found")]
    NotFound(&'static str),

    /// No verified identity on the request.
    #[error("Not authenticated")]
    Unauthenticated,

    /// Acting on a resource that belongs to another user.
    #[error("Not authorized")]
    Unauthorized,

    /// Invalid input: non-positive points/quantity, malformed barcode.
    #[error("{0}")]
    InvalidArgument(String),

    /// Debit or redemption exceeds the current balance.
    #[error("Insufficient points")]
    InsufficientBalance,

    /// Checkout attempted with no cart lines.
    #[error("Cart is empty")]
    EmptyBasket,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Unauthorized => StatusCode::FORBIDDEN,
            Self::InvalidArgument(_) | Self::EmptyBasket => StatusCode::BAD_REQUEST,
            Self::InsufficientBalance => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Don't expose internal error details to clients.
        let message = match &self {
            Self::Database(_) | Self::Internal(_) => {
                error!(error = %self, "request failed");
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
