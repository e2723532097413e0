use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

use crate::{error::ApiError, items::Item};

/// One basket line joined with its catalog item.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub cart_id: Uuid,
    pub item_id: Uuid,
    pub quantity: i64,
    pub item: Item,
}

/// Flat row for the basket join. Item columns are nullable because the join
/// is a LEFT JOIN: a dangling line must surface as "Item not found" instead
/// of silently disappearing from the basket.
#[derive(Debug, FromRow)]
struct CartLineRow {
    cart_id: Uuid,
    item_id: Uuid,
    quantity: i64,
    item_pk: Option<Uuid>,
    barcode: Option<i64>,
    name: Option<String>,
    price: Option<Decimal>,
    category: Option<String>,
    credit_value: Option<i64>,
    healthy: Option<bool>,
}

impl CartLineRow {
    fn into_line(self) -> Result<CartLine, ApiError> {
        match (
            self.item_pk,
            self.barcode,
            self.name,
            self.price,
            self.category,
            self.credit_value,
            self.healthy,
        ) {
            (
                Some(id),
                Some(barcode),
                Some(name),
                Some(price),
                Some(category),
                Some(credit_value),
                Some(healthy),
            ) => Ok(CartLine {
                cart_id: self.cart_id,
                item_id: self.item_id,
                quantity: self.quantity,
                item: Item {
                    id,
                    barcode,
                    name,
                    price,
                    category,
                    credit_value,
                    healthy,
                },
            }),
            _ => Err(ApiError::NotFound("Item")),
        }
    }
}

/// All basket lines for a user, oldest first, each resolved to its item.
pub async fn lines_for_user<'e, E>(db: E, user_id: Uuid) -> Result<Vec<CartLine>, ApiError>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, CartLineRow>(
        r#"
        SELECT c.id AS cart_id, c.item_id, c.quantity,
               i.id AS item_pk, i.barcode, i.name, i.price, i.category,
               i.credit_value, i.healthy
        FROM cart_items c
        LEFT JOIN items i ON i.id = c.item_id
        WHERE c.user_id = $1
        ORDER BY c.created_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    rows.into_iter().map(CartLineRow::into_line).collect()
}

/// Adds quantity onto the user's line for this item, creating the line when
/// there is none. Two adds of 2 and 3 leave one line with quantity 5.
pub async fn add_quantity(
    db: &PgPool,
    user_id: Uuid,
    item_id: Uuid,
    quantity: i64,
) -> Result<Uuid, ApiError> {
    let cart_id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO cart_items (user_id, item_id, quantity)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, item_id)
        DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(item_id)
    .bind(quantity)
    .fetch_one(db)
    .await?;
    Ok(cart_id)
}

/// Sets the line's quantity; a quantity of zero or below removes the line
/// entirely (the table never stores a non-positive quantity).
pub async fn set_quantity(
    db: &PgPool,
    user_id: Uuid,
    item_id: Uuid,
    quantity: i64,
) -> Result<Uuid, ApiError> {
    if quantity <= 0 {
        let removed = sqlx::query_scalar::<_, Uuid>(
            r#"DELETE FROM cart_items WHERE user_id = $1 AND item_id = $2 RETURNING id"#,
        )
        .bind(user_id)
        .bind(item_id)
        .fetch_optional(db)
        .await?;
        return removed.ok_or(ApiError::NotFound("Cart item"));
    }

    let updated = sqlx::query_scalar::<_, Uuid>(
        r#"
        UPDATE cart_items SET quantity = $3
        WHERE user_id = $1 AND item_id = $2
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(item_id)
    .bind(quantity)
    .fetch_optional(db)
    .await?;
    updated.ok_or(ApiError::NotFound("Cart item"))
}

/// Removes the line if present. Removing an absent line is not an error.
pub async fn remove(db: &PgPool, user_id: Uuid, item_id: Uuid) -> Result<bool, ApiError> {
    let result = sqlx::query(r#"DELETE FROM cart_items WHERE user_id = $1 AND item_id = $2"#)
        .bind(user_id)
        .bind(item_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Deletes every line for the user, returning how many were removed.
pub async fn clear<'e, E>(db: E, user_id: Uuid) -> Result<u64, ApiError>
where
    E: PgExecutor<'e>,
{
    let result = sqlx::query(r#"DELETE FROM cart_items WHERE user_id = $1"#)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

/// Records one purchase row per cart line at checkout time.
pub async fn record_transaction<'e, E>(
    db: E,
    user_id: Uuid,
    item_id: Uuid,
    total_amount: Decimal,
) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO transactions (user_id, item_id, total_amount)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(user_id)
    .bind(item_id)
    .bind(total_amount)
    .execute(db)
    .await?;
    Ok(())
}
