use anyhow::anyhow;
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::ApiError,
    points,
    rewards::repo::{RedeemedReward, Reward},
};

/// Exchanges points for a reward: debits the cost and inserts the snapshot
/// row in one transaction. An insufficient balance fails before any write.
/// Returns the remaining balance.
pub async fn redeem(db: &PgPool, user_id: Uuid, reward_id: Uuid) -> Result<i64, ApiError> {
    let mut tx = db.begin().await?;

    let reward = Reward::find_by_id(&mut *tx, reward_id)
        .await?
        .ok_or(ApiError::NotFound("Reward"))?;

    let reason = format!("Redeemed {}", reward.name);
    let remaining = points::services::debit(&mut tx, user_id, reward.points_required, &reason).await?;
    RedeemedReward::insert_snapshot(&mut *tx, user_id, &reward).await?;

    tx.commit().await?;

    info!(
        user_id = %user_id,
        reward = %reward.name,
        points_spent = reward.points_required,
        remaining,
        "reward redeemed"
    );

    Ok(remaining)
}

/// Marks a redemption as used, exactly once. Re-marking an already-used
/// redemption returns the original timestamp unchanged.
pub async fn mark_used(
    db: &PgPool,
    redemption_id: Uuid,
    user_id: Uuid,
) -> Result<OffsetDateTime, ApiError> {
    let redemption = RedeemedReward::find_by_id(db, redemption_id)
        .await?
        .ok_or(ApiError::NotFound("Reward"))?;

    if redemption.user_id != user_id {
        return Err(ApiError::Unauthorized);
    }

    if let Some(used_at) = redemption.used_at {
        return Ok(used_at);
    }

    match RedeemedReward::mark_used_once(db, redemption_id).await? {
        Some(used_at) => {
            info!(user_id = %user_id, redemption_id = %redemption_id, "reward marked used");
            Ok(used_at)
        }
        // Lost the race against another mark: read the winning timestamp back.
        None => RedeemedReward::find_by_id(db, redemption_id)
            .await?
            .and_then(|r| r.used_at)
            .ok_or_else(|| ApiError::Internal(anyhow!("used_at missing after mark"))),
    }
}
