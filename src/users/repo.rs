use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::AuthIdentity,
    error::ApiError,
    users::services::{is_valid_email, normalize_email},
};

/// User record in the database. Created on first sight of a verified
/// identity, never deleted; `current_points` is only touched together with a
/// ledger append.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub current_points: i64,
    pub created_at: OffsetDateTime,
}

impl User {
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, current_points, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Resolves a verified identity to a user record, provisioning one with
    /// a zero balance on first sight. The no-op `DO UPDATE` makes the upsert
    /// return the existing row when two first calls race.
    pub async fn ensure(db: &PgPool, identity: &AuthIdentity) -> Result<User, ApiError> {
        let email = normalize_email(&identity.email);
        if !is_valid_email(&email) {
            warn!(email = %email, "identity carries an invalid email");
            return Err(ApiError::Unauthenticated);
        }

        let name = if identity.name.trim().is_empty() {
            email.clone()
        } else {
            identity.name.trim().to_string()
        };

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email)
            VALUES ($1, $2)
            ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
            RETURNING id, name, email, current_points, created_at
            "#,
        )
        .bind(&name)
        .bind(&email)
        .fetch_one(db)
        .await
        .map_err(ApiError::Database)?;

        info!(user_id = %user.id, email = %user.email, "user resolved");
        Ok(user)
    }

    /// Read-side resolution: looks the identity up without provisioning.
    pub async fn find_by_identity(
        db: &PgPool,
        identity: &AuthIdentity,
    ) -> anyhow::Result<Option<User>> {
        Self::find_by_email(db, &normalize_email(&identity.email)).await
    }
}
