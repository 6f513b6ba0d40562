//! Room service domain model and request DTOs.
//!
//! # Invariants
//! - Ids are assigned by storage; drafts carry no id.
//! - `created_at` never changes after insert; `updated_at` moves on every write.

pub mod dto;
pub mod room;
pub mod room_feature;

pub use dto::{RoomFeatureRegister, RoomImageRegister, RoomRegister};
pub use room::{Room, RoomDraft, RoomId, RoomImage, RoomState, RoomType};
pub use room_feature::{RoomFeature, RoomFeatureDraft, RoomFeatureId};
