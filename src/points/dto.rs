use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsBalance {
    pub current_points: i64,
}

/// Request body for awarding points (receipt scans, promotions).
#[derive(Debug, Deserialize)]
pub struct AwardPointsRequest {
    pub points: i64,
    #[serde(default)]
    pub reason: Option<String>,
}
