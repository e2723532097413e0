use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub item_id: Uuid,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct RemoveItemResponse {
    pub removed: bool,
}

#[derive(Debug, Serialize)]
pub struct ClearCartResponse {
    pub removed: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub total_points: i64,
    pub total_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn add_request_uses_camel_case() {
        let req: AddToCartRequest = serde_json::from_str(
            r#"{"itemId": "2d9f8c1e-5f7a-4b3c-9f00-0123456789ab", "quantity": 2}"#,
        )
        .unwrap();
        assert_eq!(req.quantity, 2);
    }

    #[test]
    fn checkout_response_shape() {
        let json = serde_json::to_string(&CheckoutResponse {
            total_points: 22,
            total_amount: dec!(67.00),
        })
        .unwrap();
        assert!(json.contains("\"totalPoints\":22"));
        assert!(json.contains("totalAmount"));
    }
}
