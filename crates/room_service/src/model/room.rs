//! Room entity and its enums.

use super::room_feature::RoomFeature;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type RoomId = i64;

/// Room category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    Simple,
    Double,
    Suite,
}

impl RoomType {
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Simple => "SIMPLE",
            Self::Double => "DOUBLE",
            Self::Suite => "SUITE",
        }
    }

    pub fn from_db_str(value: &str) -> Option<Self> {
        match value {
            "SIMPLE" => Some(Self::Simple),
            "DOUBLE" => Some(Self::Double),
            "SUITE" => Some(Self::Suite),
            _ => None,
        }
    }
}

/// Operational state of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomState {
    Available,
    NotAvailable,
    Occupied,
    OnCleaning,
    OnMaintaining,
}

impl RoomState {
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::NotAvailable => "NOT_AVAILABLE",
            Self::Occupied => "OCCUPIED",
            Self::OnCleaning => "ON_CLEANING",
            Self::OnMaintaining => "ON_MAINTAINING",
        }
    }

    pub fn from_db_str(value: &str) -> Option<Self> {
        match value {
            "AVAILABLE" => Some(Self::Available),
            "NOT_AVAILABLE" => Some(Self::NotAvailable),
            "OCCUPIED" => Some(Self::Occupied),
            "ON_CLEANING" => Some(Self::OnCleaning),
            "ON_MAINTAINING" => Some(Self::OnMaintaining),
            _ => None,
        }
    }
}

/// Picture of a room. Owned by exactly one room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomImage {
    pub id: i64,
    pub path: String,
    /// Owning room; kept out of the JSON shape.
    #[serde(skip)]
    pub room_id: RoomId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Persisted room with its images and linked features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub room_number: i64,
    pub price_by_night: f64,
    pub room_type: RoomType,
    pub room_state: RoomState,
    pub room_images: Vec<RoomImage>,
    pub room_features: Vec<RoomFeature>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Writable room fields plus the image set that replaces any existing one.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomDraft {
    pub room_number: i64,
    pub price_by_night: f64,
    pub room_type: RoomType,
    pub room_state: RoomState,
    pub image_paths: Vec<String>,
}

impl Room {
    /// Returns whether a feature with `feature_id` is linked to this room.
    pub fn has_feature(&self, feature_id: i64) -> bool {
        self.room_features
            .iter()
            .any(|feature| feature.id == feature_id)
    }
}

#[cfg(test)]
mod tests {
    use super::{RoomState, RoomType};

    #[test]
    fn enums_roundtrip_through_db_strings() {
        for kind in [RoomType::Simple, RoomType::Double, RoomType::Suite] {
            assert_eq!(RoomType::from_db_str(kind.as_db_str()), Some(kind));
        }
        for state in [
            RoomState::Available,
            RoomState::NotAvailable,
            RoomState::Occupied,
            RoomState::OnCleaning,
            RoomState::OnMaintaining,
        ] {
            assert_eq!(RoomState::from_db_str(state.as_db_str()), Some(state));
        }
        assert_eq!(RoomType::from_db_str("simple"), None);
    }

    #[test]
    fn enum_json_matches_db_strings() {
        let json = serde_json::to_string(&RoomState::OnMaintaining).unwrap();
        assert_eq!(json, "\"ON_MAINTAINING\"");
        let parsed: RoomType = serde_json::from_str("\"SUITE\"").unwrap();
        assert_eq!(parsed, RoomType::Suite);
    }
}
