use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// One row of the append-only points ledger. Exactly one of `earned` and
/// `spent` is non-zero.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub earned: i64,
    pub spent: i64,
    pub reason: String,
    pub created_at: OffsetDateTime,
}

impl LedgerEntry {
    /// Full history for a user, newest first.
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<LedgerEntry>> {
        let rows = sqlx::query_as::<_, LedgerEntry>(
            r#"
            SELECT id, user_id, earned, spent, reason, created_at
            FROM points_ledger
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Appends a ledger row. Only called from the balance engine, inside the
    /// same transaction that updates `users.current_points`.
    pub(crate) async fn append(
        conn: &mut PgConnection,
        user_id: Uuid,
        earned: i64,
        spent: i64,
        reason: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO points_ledger (user_id, earned, spent, reason)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(user_id)
        .bind(earned)
        .bind(spent)
        .bind(reason)
        .execute(conn)
        .await?;
        Ok(())
    }
}
