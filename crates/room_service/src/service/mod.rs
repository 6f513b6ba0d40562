//! Room service use cases.
//!
//! # Responsibility
//! - Map request DTOs onto drafts and resolve referenced features.
//! - Turn repository failures into user-facing service errors.
//!
//! # Invariants
//! - Writes return the record as stored, read back after commit.
//! - Deletes check existence first and report a missing record as not found.

pub mod room_feature_service;
pub mod room_service;

pub use room_feature_service::RoomFeatureService;
pub use room_service::RoomService;
