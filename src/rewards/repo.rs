use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgExecutor, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Redeemable reward. Immutable reference data, seeded by migration.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub id: Uuid,
    pub name: String,
    pub points_required: i64,
    pub description: String,
}

impl Reward {
    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<Reward>> {
        let rewards = sqlx::query_as::<_, Reward>(
            r#"
            SELECT id, name, points_required, description
            FROM rewards
            ORDER BY points_required ASC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rewards)
    }

    pub async fn find_by_id<'e, E>(db: E, id: Uuid) -> Result<Option<Reward>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Reward>(
            r#"
            SELECT id, name, points_required, description
            FROM rewards
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }
}

/// A redemption. Name and cost are copied from the reward at redemption
/// time so the history survives later catalog edits.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RedeemedReward {
    pub id: Uuid,
    pub user_id: Uuid,
    pub reward_id: Uuid,
    pub reward_name: String,
    pub points_spent: i64,
    pub redeemed_at: OffsetDateTime,
    pub used_at: Option<OffsetDateTime>,
}

impl RedeemedReward {
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<RedeemedReward>> {
        let rows = sqlx::query_as::<_, RedeemedReward>(
            r#"
            SELECT id, user_id, reward_id, reward_name, points_spent, redeemed_at, used_at
            FROM user_rewards
            WHERE user_id = $1
            ORDER BY redeemed_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<RedeemedReward>> {
        let row = sqlx::query_as::<_, RedeemedReward>(
            r#"
            SELECT id, user_id, reward_id, reward_name, points_spent, redeemed_at, used_at
            FROM user_rewards
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// Inserts the snapshot row for a redemption.
    pub(crate) async fn insert_snapshot<'e, E>(
        db: E,
        user_id: Uuid,
        reward: &Reward,
    ) -> Result<RedeemedReward, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, RedeemedReward>(
            r#"
            INSERT INTO user_rewards (user_id, reward_id, reward_name, points_spent)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, reward_id, reward_name, points_spent, redeemed_at, used_at
            "#,
        )
        .bind(user_id)
        .bind(reward.id)
        .bind(&reward.name)
        .bind(reward.points_required)
        .fetch_one(db)
        .await
    }

    /// Write-once used marker: only flips rows whose `used_at` is still
    /// NULL, so a second caller observes `None` and reads the original
    /// timestamp back instead of overwriting it.
    pub(crate) async fn mark_used_once(
        db: &PgPool,
        id: Uuid,
    ) -> Result<Option<OffsetDateTime>, sqlx::Error> {
        sqlx::query_scalar::<_, OffsetDateTime>(
            r#"
            UPDATE user_rewards SET used_at = now()
            WHERE id = $1 AND used_at IS NULL
            RETURNING used_at
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }
}
