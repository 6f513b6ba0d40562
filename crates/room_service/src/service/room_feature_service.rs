//! Room feature use-case service.

use crate::model::{RoomFeature, RoomFeatureDraft, RoomFeatureId, RoomFeatureRegister};
use crate::repo::RoomFeatureRepository;
use hotel_core::{Page, PageRequest, RepoError, ServiceError, ServiceResult};
use log::info;

pub struct RoomFeatureService<F: RoomFeatureRepository> {
    repo: F,
}

impl<F: RoomFeatureRepository> RoomFeatureService<F> {
    pub fn new(repo: F) -> Self {
        Self { repo }
    }

    pub fn find_all_pageable(&self, page: PageRequest) -> ServiceResult<Page<RoomFeature>> {
        self.repo
            .find_feature_page(page)
            .map_err(ServiceError::unexpected(
                "Unexpected error while loading room features",
            ))
    }

    pub fn find_all(&self) -> ServiceResult<Vec<RoomFeature>> {
        self.repo
            .find_all_features()
            .map_err(ServiceError::unexpected(
                "Unexpected error while loading room features",
            ))
    }

    pub fn find_by_id(&self, id: RoomFeatureId) -> ServiceResult<RoomFeature> {
        self.repo
            .find_feature(id)
            .map_err(ServiceError::unexpected(
                "Unexpected error while loading room feature",
            ))?
            .ok_or_else(|| ServiceError::not_found(feature_not_found(id)))
    }

    pub fn save(&self, dto: &RoomFeatureRegister) -> ServiceResult<RoomFeature> {
        let draft = RoomFeatureDraft::from(dto);
        let id = self
            .repo
            .insert_feature(&draft)
            .map_err(ServiceError::unexpected(
                "Unexpected error while saving room feature",
            ))?;

        info!("event=room_feature_saved module=room_feature status=ok feature_id={id}");
        self.find_by_id(id)
    }

    /// Copies name and price onto the stored feature.
    pub fn update(&self, id: RoomFeatureId, dto: &RoomFeatureRegister) -> ServiceResult<RoomFeature> {
        self.find_by_id(id)?;
        let draft = RoomFeatureDraft::from(dto);
        self.repo
            .update_feature(id, &draft)
            .map_err(|err| match err {
                RepoError::NotFound { .. } => ServiceError::not_found(feature_not_found(id)),
                err => ServiceError::Unexpected {
                    message: "Unexpected error while updating room feature",
                    source: err,
                },
            })?;

        info!("event=room_feature_updated module=room_feature status=ok feature_id={id}");
        self.find_by_id(id)
    }

    /// Deletes a feature. Fails with an unexpected error while any room
    /// still links it.
    pub fn delete(&self, id: RoomFeatureId) -> ServiceResult<()> {
        self.find_by_id(id)?;
        self.repo.delete_feature(id).map_err(|err| match err {
            RepoError::NotFound { .. } => ServiceError::not_found(feature_not_found(id)),
            err => ServiceError::Unexpected {
                message: "Unexpected error while deleting the room feature",
                source: err,
            },
        })?;

        info!("event=room_feature_deleted module=room_feature status=ok feature_id={id}");
        Ok(())
    }
}

fn feature_not_found(id: RoomFeatureId) -> String {
    format!("Room Feature with id:{id} not found.")
}
