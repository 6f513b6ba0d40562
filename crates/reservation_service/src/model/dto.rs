//! Request bodies of the reservation endpoints.

use super::reservation::ReservationDraft;
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

/// Body of `POST /reservations/create` and `PUT /reservations/update/:id`.
///
/// `userId` is required; a missing or `null` value is rejected while the
/// body is decoded.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRegister {
    pub user_id: i64,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    #[validate(nested)]
    pub user_reservations: Vec<UserReservationRegister>,
    #[serde(default)]
    #[validate(nested)]
    pub room_reservations: Vec<RoomReservationRegister>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserReservationRegister {
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub user_id: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomReservationRegister {
    #[validate(range(min = 1, message = "must be a positive id"))]
    pub room_id: i64,
}

impl From<&ReservationRegister> for ReservationDraft {
    fn from(value: &ReservationRegister) -> Self {
        Self {
            user_id: value.user_id,
            start_date: value.start_date,
            end_date: value.end_date,
            user_ids: value
                .user_reservations
                .iter()
                .map(|entry| entry.user_id)
                .collect(),
            room_ids: value
                .room_reservations
                .iter()
                .map(|entry| entry.room_id)
                .collect(),
        }
    }
}
