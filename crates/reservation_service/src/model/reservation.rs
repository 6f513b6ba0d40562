//! Reservation aggregate.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

pub type ReservationId = i64;

/// User attached to a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReservation {
    pub id: i64,
    pub user_id: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Room attached to a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomReservation {
    pub id: i64,
    pub room_id: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    pub user_id: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub user_reservations: Vec<UserReservation>,
    pub room_reservations: Vec<RoomReservation>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Every writable reservation field. Child id lists replace the stored rows
/// wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationDraft {
    pub user_id: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub user_ids: Vec<i64>,
    pub room_ids: Vec<i64>,
}

impl Reservation {
    /// Ids of the rooms booked by this reservation, in insertion order.
    pub fn room_ids(&self) -> Vec<i64> {
        self.room_reservations
            .iter()
            .map(|room| room.room_id)
            .collect()
    }
}
