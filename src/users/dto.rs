use serde::Serialize;
use uuid::Uuid;

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub current_points: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_serializes_camel_case() {
        let user = PublicUser {
            id: Uuid::new_v4(),
            name: "Shopper".into(),
            email: "shopper@example.com".into(),
            current_points: 120,
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("shopper@example.com"));
        assert!(json.contains("\"currentPoints\":120"));
    }
}
