use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Immutable catalog item. Seeded by migration, never written at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub barcode: i64,
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub credit_value: i64,
    pub healthy: bool,
}

impl Item {
    pub async fn find_by_barcode(db: &PgPool, barcode: i64) -> anyhow::Result<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, barcode, name, price, category, credit_value, healthy
            FROM items
            WHERE barcode = $1
            "#,
        )
        .bind(barcode)
        .fetch_optional(db)
        .await?;
        Ok(item)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, barcode, name, price, category, credit_value, healthy
            FROM items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(item)
    }
}
