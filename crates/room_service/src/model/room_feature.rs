//! Additional paid service that can be linked to many rooms.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type RoomFeatureId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomFeature {
    pub id: RoomFeatureId,
    pub service_name: String,
    pub service_price: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomFeatureDraft {
    pub service_name: String,
    pub service_price: f64,
}
