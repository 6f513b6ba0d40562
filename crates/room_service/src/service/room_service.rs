//! Room use-case service.

use crate::model::{Room, RoomDraft, RoomFeatureId, RoomId, RoomRegister, RoomState, RoomType};
use crate::repo::{RoomFeatureRepository, RoomFilter, RoomRepository};
use hotel_core::{Page, PageRequest, RepoError, ServiceError, ServiceResult};
use log::info;

const FEATURES_NOT_FOUND: &str = "One or more Room Features not found";

/// Room CRUD and filtered listings.
pub struct RoomService<R: RoomRepository, F: RoomFeatureRepository> {
    rooms: R,
    features: F,
}

impl<R: RoomRepository, F: RoomFeatureRepository> RoomService<R, F> {
    pub fn new(rooms: R, features: F) -> Self {
        Self { rooms, features }
    }

    pub fn find_all(&self, page: PageRequest) -> ServiceResult<Page<Room>> {
        self.find_page(&RoomFilter::All, page)
    }

    pub fn find_by_id(&self, id: RoomId) -> ServiceResult<Room> {
        self.rooms
            .find_room(id)
            .map_err(ServiceError::unexpected("Unexpected error while loading room"))?
            .ok_or_else(|| ServiceError::not_found(room_not_found(id)))
    }

    /// Creates a room with its images and the referenced features.
    ///
    /// # Errors
    /// - `NotFound` when any id in `room_feature_ids` does not exist.
    pub fn save(&self, dto: &RoomRegister) -> ServiceResult<Room> {
        let feature_ids = self.resolve_feature_ids(&dto.room_feature_ids)?;
        let draft = RoomDraft::from(dto);
        let id = self
            .rooms
            .insert_room(&draft, &feature_ids)
            .map_err(ServiceError::unexpected("Unexpected error while saving room"))?;

        info!(
            "event=room_saved module=room status=ok room_id={} images={} features={}",
            id,
            draft.image_paths.len(),
            feature_ids.len()
        );
        self.find_by_id(id)
    }

    /// Copies the DTO onto the stored room, replacing its images and
    /// feature links. Identity and creation time are kept.
    pub fn update(&self, id: RoomId, dto: &RoomRegister) -> ServiceResult<Room> {
        self.ensure_exists(id)?;
        let feature_ids = self.resolve_feature_ids(&dto.room_feature_ids)?;
        let draft = RoomDraft::from(dto);

        self.rooms
            .update_room(id, &draft, &feature_ids)
            .map_err(|err| match err {
                RepoError::NotFound { .. } => ServiceError::not_found(room_not_found(id)),
                err if err.is_constraint_violation() => ServiceError::Unexpected {
                    message: "Error updating room. Possible data integrity issue",
                    source: err,
                },
                err => ServiceError::Unexpected {
                    message: "Unexpected error while updating room",
                    source: err,
                },
            })?;

        info!("event=room_updated module=room status=ok room_id={id}");
        self.find_by_id(id)
    }

    pub fn delete(&self, id: RoomId) -> ServiceResult<()> {
        self.ensure_exists(id)?;
        self.rooms.delete_room(id).map_err(|err| match err {
            RepoError::NotFound { .. } => ServiceError::not_found(room_not_found(id)),
            err => ServiceError::Unexpected {
                message: "Unexpected error while deleting the room",
                source: err,
            },
        })?;

        info!("event=room_deleted module=room status=ok room_id={id}");
        Ok(())
    }

    /// Rooms priced within `[min, max]`.
    pub fn find_by_price_by_night_between(
        &self,
        min: f64,
        max: f64,
        page: PageRequest,
    ) -> ServiceResult<Page<Room>> {
        self.find_page(&RoomFilter::PriceBetween { min, max }, page)
    }

    pub fn find_by_price_by_night_greater_than(
        &self,
        price: f64,
        page: PageRequest,
    ) -> ServiceResult<Page<Room>> {
        self.find_page(&RoomFilter::PriceGreaterThan(price), page)
    }

    pub fn find_by_price_by_night_less_than(
        &self,
        price: f64,
        page: PageRequest,
    ) -> ServiceResult<Page<Room>> {
        self.find_page(&RoomFilter::PriceLessThan(price), page)
    }

    pub fn find_by_room_type(
        &self,
        room_type: RoomType,
        page: PageRequest,
    ) -> ServiceResult<Page<Room>> {
        self.find_page(&RoomFilter::Type(room_type), page)
    }

    pub fn find_by_room_state(
        &self,
        room_state: RoomState,
        page: PageRequest,
    ) -> ServiceResult<Page<Room>> {
        self.find_page(&RoomFilter::State(room_state), page)
    }

    pub fn find_by_room_type_and_room_state(
        &self,
        room_type: RoomType,
        room_state: RoomState,
        page: PageRequest,
    ) -> ServiceResult<Page<Room>> {
        self.find_page(&RoomFilter::TypeAndState(room_type, room_state), page)
    }

    fn find_page(&self, filter: &RoomFilter, page: PageRequest) -> ServiceResult<Page<Room>> {
        self.rooms
            .find_room_page(filter, page)
            .map_err(ServiceError::unexpected("Unexpected error while loading rooms"))
    }

    fn ensure_exists(&self, id: RoomId) -> ServiceResult<()> {
        let exists = self
            .rooms
            .room_exists(id)
            .map_err(ServiceError::unexpected("Unexpected error while loading room"))?;
        if !exists {
            return Err(ServiceError::not_found(room_not_found(id)));
        }
        Ok(())
    }

    /// Deduplicates `ids` and checks every one of them exists.
    fn resolve_feature_ids(&self, ids: &[RoomFeatureId]) -> ServiceResult<Vec<RoomFeatureId>> {
        let mut unique = ids.to_vec();
        unique.sort_unstable();
        unique.dedup();

        let found = self
            .features
            .find_features_by_ids(&unique)
            .map_err(ServiceError::unexpected(
                "Unexpected error while loading room features",
            ))?;
        if found.len() != unique.len() {
            return Err(ServiceError::not_found(FEATURES_NOT_FOUND));
        }
        Ok(unique)
    }
}

fn room_not_found(id: RoomId) -> String {
    format!("Room with id: {id} not found.")
}
