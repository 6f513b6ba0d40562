//! Room service: rooms, their images and the features they offer.
//!
//! Layering is `api → service → repo → model`; the HTTP layer runs each use
//! case against the shared SQLite connection from [`hotel_core::DbHandle`].

pub mod api;
pub mod db;
pub mod model;
pub mod repo;
pub mod service;

use hotel_core::ServiceDefaults;

pub const DEFAULTS: ServiceDefaults = ServiceDefaults {
    name: "room_service",
    env_prefix: "ROOM",
    port: 8081,
};

pub use api::router;
pub use db::{open_db, open_db_in_memory, MIGRATIONS};
pub use repo::{
    RoomFeatureRepository, RoomFilter, RoomRepository, SqliteRoomFeatureRepository,
    SqliteRoomRepository,
};
pub use service::{RoomFeatureService, RoomService};
