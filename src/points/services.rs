//! Balance engine. Every balance change locks the user row, applies the
//! guarded arithmetic, writes the new balance and appends exactly one ledger
//! row, all inside the caller's transaction: either everything lands or
//! nothing does.

use sqlx::{Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::{error::ApiError, points::repo::LedgerEntry};

/// Guarded credit arithmetic: amount must be strictly positive.
pub(crate) fn apply_credit(balance: i64, amount: i64) -> Result<i64, ApiError> {
    if amount <= 0 {
        return Err(ApiError::InvalidArgument(
            "Points must be greater than zero".into(),
        ));
    }
    Ok(balance + amount)
}

/// Guarded debit arithmetic: amount must be strictly positive and covered by
/// the current balance.
pub(crate) fn apply_debit(balance: i64, amount: i64) -> Result<i64, ApiError> {
    if amount <= 0 {
        return Err(ApiError::InvalidArgument(
            "Points must be greater than zero".into(),
        ));
    }
    if amount > balance {
        return Err(ApiError::InsufficientBalance);
    }
    Ok(balance - amount)
}

/// Locks the user row for the rest of the transaction and returns the
/// balance as of the lock.
async fn lock_balance(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
) -> Result<i64, ApiError> {
    sqlx::query_scalar::<_, i64>(
        r#"SELECT current_points FROM users WHERE id = $1 FOR UPDATE"#,
    )
    .bind(user_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or(ApiError::NotFound("User"))
}

async fn store_balance(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    balance: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(r#"UPDATE users SET current_points = $2 WHERE id = $1"#)
        .bind(user_id)
        .bind(balance)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Atomically increments the balance and appends an `earned` ledger row.
/// Returns the new balance.
pub async fn credit(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    amount: i64,
    reason: &str,
) -> Result<i64, ApiError> {
    let balance = lock_balance(tx, user_id).await?;
    let next = apply_credit(balance, amount)?;
    store_balance(tx, user_id, next).await?;
    LedgerEntry::append(&mut **tx, user_id, amount, 0, reason).await?;
    info!(user_id = %user_id, amount, balance = next, reason, "points credited");
    Ok(next)
}

/// Atomically decrements the balance and appends a `spent` ledger row.
/// Fails with `InsufficientBalance` before any write if the balance does not
/// cover the amount. Returns the new balance.
pub async fn debit(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    amount: i64,
    reason: &str,
) -> Result<i64, ApiError> {
    let balance = lock_balance(tx, user_id).await?;
    let next = apply_debit(balance, amount)?;
    store_balance(tx, user_id, next).await?;
    LedgerEntry::append(&mut **tx, user_id, 0, amount, reason).await?;
    info!(user_id = %user_id, amount, balance = next, reason, "points debited");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_increases_balance() {
        assert_eq!(apply_credit(0, 22).unwrap(), 22);
        assert_eq!(apply_credit(50, 8).unwrap(), 58);
    }

    #[test]
    fn credit_rejects_non_positive_amounts() {
        for amount in [0, -1, -50] {
            let err = apply_credit(100, amount).unwrap_err();
            assert_eq!(err.to_string(), "Points must be greater than zero");
        }
    }

    #[test]
    fn debit_decreases_balance() {
        assert_eq!(apply_debit(50, 50).unwrap(), 0);
        assert_eq!(apply_debit(100, 30).unwrap(), 70);
    }

    #[test]
    fn debit_rejects_non_positive_amounts() {
        for amount in [0, -1, -50] {
            assert!(apply_debit(100, amount).is_err());
        }
    }

    #[test]
    fn debit_beyond_balance_is_insufficient() {
        let err = apply_debit(49, 50).unwrap_err();
        assert!(matches!(err, ApiError::InsufficientBalance));
    }

    #[test]
    fn balance_equals_lifetime_earned_minus_spent() {
        // Replay a mixed history through the guarded arithmetic and check the
        // ledger invariant: balance == sum(earned) - sum(spent), never negative.
        let ops: &[(i64, bool)] = &[
            (100, true),
            (30, false),
            (22, true),
            (92, false),
            (5, true),
        ];

        let mut balance = 0i64;
        let mut earned = 0i64;
        let mut spent = 0i64;
        for &(amount, is_credit) in ops {
            balance = if is_credit {
                earned += amount;
                apply_credit(balance, amount).unwrap()
            } else {
                spent += amount;
                apply_debit(balance, amount).unwrap()
            };
            assert!(balance >= 0);
            assert_eq!(balance, earned - spent);
        }
        assert_eq!(balance, 5);
    }

    #[test]
    fn failed_debit_leaves_balance_untouched() {
        let balance = 49;
        assert!(apply_debit(balance, 50).is_err());
        // The caller keeps the original balance; nothing was consumed.
        assert_eq!(apply_debit(balance, 49).unwrap(), 0);
    }
}
