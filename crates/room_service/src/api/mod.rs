//! HTTP routes of the room service.
//!
//! Static segments (`/rooms/features`, `/rooms/create`, ...) win over the
//! `/rooms/:id` capture.

mod room;
mod room_feature;

use crate::repo::{SqliteRoomFeatureRepository, SqliteRoomRepository};
use crate::service::{RoomFeatureService, RoomService};
use axum::routing::{delete, get, post, put};
use axum::Router;
use hotel_core::{DbHandle, ServiceError, ServiceResult};
use rusqlite::Connection;

/// Builds the room service router over `db`.
pub fn router(db: DbHandle) -> Router {
    Router::new()
        .route("/rooms", get(room::find_all))
        .route("/rooms/create", post(room::create))
        .route("/rooms/update/:id", put(room::update))
        .route("/rooms/delete/:id", delete(room::delete))
        .route(
            "/rooms/price-by-night-between",
            get(room::find_by_price_by_night_between),
        )
        .route(
            "/rooms/price-by-night-greater-than",
            get(room::find_by_price_by_night_greater_than),
        )
        .route(
            "/rooms/price-by-night-lower-than",
            get(room::find_by_price_by_night_less_than),
        )
        .route("/rooms/by-room-type", get(room::find_by_room_type))
        .route("/rooms/by-room-state", get(room::find_by_room_state))
        .route(
            "/rooms/by-room-type-and-room-state",
            get(room::find_by_room_type_and_room_state),
        )
        .route("/rooms/features", get(room_feature::find_all_pageable))
        .route("/rooms/features/all", get(room_feature::find_all))
        .route("/rooms/features/create", post(room_feature::create))
        .route("/rooms/features/update/:id", put(room_feature::update))
        .route("/rooms/features/delete/:id", delete(room_feature::delete))
        .route("/rooms/features/:id", get(room_feature::find_by_id))
        .route("/rooms/:id", get(room::find_by_id))
        .with_state(db)
}

type SqliteRoomService<'conn> =
    RoomService<SqliteRoomRepository<'conn>, SqliteRoomFeatureRepository<'conn>>;

fn room_service(conn: &Connection) -> ServiceResult<SqliteRoomService<'_>> {
    let rooms = SqliteRoomRepository::try_new(conn).map_err(storage_not_ready)?;
    let features = SqliteRoomFeatureRepository::try_new(conn).map_err(storage_not_ready)?;
    Ok(RoomService::new(rooms, features))
}

fn room_feature_service(
    conn: &Connection,
) -> ServiceResult<RoomFeatureService<SqliteRoomFeatureRepository<'_>>> {
    let repo = SqliteRoomFeatureRepository::try_new(conn).map_err(storage_not_ready)?;
    Ok(RoomFeatureService::new(repo))
}

fn storage_not_ready(err: hotel_core::RepoError) -> ServiceError {
    ServiceError::unexpected("Room storage is not ready")(err)
}
