//! Room service repositories.
//!
//! # Responsibility
//! - Keep SQL for rooms, images, features and their links in one place.
//! - Make multi-table writes atomic.
//!
//! # Invariants
//! - Repositories only accept connections migrated to the latest room schema.
//! - Room writes replace the whole image set and the whole feature link set.

pub mod room_feature_repo;
pub mod room_repo;

pub use room_feature_repo::{RoomFeatureRepository, SqliteRoomFeatureRepository};
pub use room_repo::{RoomFilter, RoomRepository, SqliteRoomRepository};
