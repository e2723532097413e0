use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    cart::repo::{self, CartLine},
    error::ApiError,
    points,
};

/// Derived basket totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartTotals {
    pub total_items: i64,
    pub total_points: i64,
    pub total_amount: Decimal,
}

/// Sums quantity, price and credit value over the basket lines.
pub fn compute_totals(lines: &[CartLine]) -> CartTotals {
    let mut totals = CartTotals {
        total_items: 0,
        total_points: 0,
        total_amount: Decimal::ZERO,
    };
    for line in lines {
        totals.total_items += line.quantity;
        totals.total_points += line.item.credit_value * line.quantity;
        totals.total_amount += line.item.price * Decimal::from(line.quantity);
    }
    totals
}

#[derive(Debug, Clone)]
pub struct CheckoutSummary {
    pub total_points: i64,
    pub total_amount: Decimal,
}

/// Checks the basket out: records one transaction row per line, credits the
/// earned points in a single ledger entry and clears the basket. Runs as one
/// database transaction, so a failure on any line (or an empty basket) leaves
/// the cart, ledger and balance untouched.
pub async fn checkout(db: &PgPool, user_id: Uuid) -> Result<CheckoutSummary, ApiError> {
    let mut tx = db.begin().await?;

    let lines = repo::lines_for_user(&mut *tx, user_id).await?;
    if lines.is_empty() {
        return Err(ApiError::EmptyBasket);
    }

    let totals = compute_totals(&lines);

    for line in &lines {
        let line_total = line.item.price * Decimal::from(line.quantity);
        repo::record_transaction(&mut *tx, user_id, line.item.id, line_total).await?;
    }

    if totals.total_points > 0 {
        points::services::credit(&mut tx, user_id, totals.total_points, "Checkout").await?;
    }
    repo::clear(&mut *tx, user_id).await?;

    tx.commit().await?;

    info!(
        user_id = %user_id,
        total_points = totals.total_points,
        total_amount = %totals.total_amount,
        lines = lines.len(),
        "cart checked out"
    );

    Ok(CheckoutSummary {
        total_points: totals.total_points,
        total_amount: totals.total_amount,
    })
}
