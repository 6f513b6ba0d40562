//! Request bodies and their mapping onto drafts.
//!
//! Field checks run at the HTTP boundary through `validator`; the mapping
//! below assumes a validated DTO.

use super::room::{RoomDraft, RoomState, RoomType};
use super::room_feature::RoomFeatureDraft;
use hotel_core::validation::not_blank;
use serde::Deserialize;
use validator::Validate;

/// Body of `POST /rooms/create` and `PUT /rooms/update/:id`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomRegister {
    #[validate(range(min = 1, message = "must be greater than or equal to 1"))]
    pub room_number: i64,
    #[validate(range(min = 0.0, message = "must be greater than or equal to 0"))]
    pub price_by_night: f64,
    pub room_type: RoomType,
    pub room_state: RoomState,
    #[serde(default)]
    #[validate(nested)]
    pub room_images: Vec<RoomImageRegister>,
    #[serde(default)]
    pub room_feature_ids: Vec<i64>,
}

/// Image entry of a room body. A client-sent `roomId` is ignored; images
/// always belong to the room being written.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomImageRegister {
    #[validate(custom(function = "not_blank"))]
    pub path: String,
}

/// Body of `POST /rooms/features/create` and `PUT /rooms/features/update/:id`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomFeatureRegister {
    #[validate(custom(function = "not_blank"))]
    pub service_name: String,
    #[validate(range(min = 0.0, message = "must be greater than or equal to 0"))]
    pub service_price: f64,
}

impl From<&RoomRegister> for RoomDraft {
    fn from(value: &RoomRegister) -> Self {
        Self {
            room_number: value.room_number,
            price_by_night: value.price_by_night,
            room_type: value.room_type,
            room_state: value.room_state,
            image_paths: value
                .room_images
                .iter()
                .map(|image| image.path.trim().to_string())
                .collect(),
        }
    }
}

impl From<&RoomFeatureRegister> for RoomFeatureDraft {
    fn from(value: &RoomFeatureRegister) -> Self {
        Self {
            service_name: value.service_name.trim().to_string(),
            service_price: value.service_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RoomFeatureRegister, RoomRegister};
    use crate::model::{RoomDraft, RoomState, RoomType};
    use validator::Validate;

    fn room_body(json: &str) -> RoomRegister {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn optional_collections_default_to_empty() {
        let dto = room_body(
            r#"{"roomNumber": 101, "priceByNight": 80.5, "roomType": "DOUBLE", "roomState": "AVAILABLE"}"#,
        );
        assert!(dto.room_images.is_empty());
        assert!(dto.room_feature_ids.is_empty());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn invalid_fields_are_reported() {
        let dto = room_body(
            r#"{"roomNumber": 0, "priceByNight": -1, "roomType": "SUITE", "roomState": "OCCUPIED",
                "roomImages": [{"path": "  ", "roomId": 3}]}"#,
        );
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.errors().len(), 3);
    }

    #[test]
    fn blank_feature_name_is_rejected() {
        let dto: RoomFeatureRegister =
            serde_json::from_str(r#"{"serviceName": " ", "servicePrice": 5}"#).unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn draft_mapping_trims_image_paths() {
        let dto = room_body(
            r#"{"roomNumber": 7, "priceByNight": 120, "roomType": "SUITE", "roomState": "ON_CLEANING",
                "roomImages": [{"path": " /img/a.png "}]}"#,
        );
        let draft = RoomDraft::from(&dto);
        assert_eq!(draft.room_type, RoomType::Suite);
        assert_eq!(draft.room_state, RoomState::OnCleaning);
        assert_eq!(draft.image_paths, vec!["/img/a.png".to_string()]);
    }
}
