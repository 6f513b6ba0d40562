//! Reservation use-case service.
//!
//! # Invariants
//! - Writes return the reservation as stored, read back after commit.
//! - Update and delete report a missing reservation as not found, never as
//!   an unexpected failure.

use crate::model::{Reservation, ReservationDraft, ReservationId, ReservationRegister};
use crate::repo::{ReservationFilter, ReservationRepository};
use chrono::NaiveDate;
use hotel_core::{Page, PageRequest, RepoError, ServiceError, ServiceResult};
use log::info;

const LOAD_FAILED: &str = "Unexpected error while loading reservations.";

pub struct ReservationService<R: ReservationRepository> {
    repo: R,
}

impl<R: ReservationRepository> ReservationService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn find_all(&self) -> ServiceResult<Vec<Reservation>> {
        self.repo
            .find_all_reservations()
            .map_err(ServiceError::unexpected(LOAD_FAILED))
    }

    pub fn find_by_id(&self, id: ReservationId) -> ServiceResult<Reservation> {
        self.repo
            .find_reservation(id)
            .map_err(ServiceError::unexpected(LOAD_FAILED))?
            .ok_or_else(|| ServiceError::not_found(reservation_not_found(id)))
    }

    pub fn find_by_user_id(&self, user_id: i64, page: PageRequest) -> ServiceResult<Page<Reservation>> {
        self.find_page(&ReservationFilter::UserId(user_id), page)
    }

    pub fn find_by_start_date(
        &self,
        start_date: NaiveDate,
        page: PageRequest,
    ) -> ServiceResult<Page<Reservation>> {
        self.find_page(&ReservationFilter::StartDate(start_date), page)
    }

    pub fn find_by_end_date(
        &self,
        end_date: NaiveDate,
        page: PageRequest,
    ) -> ServiceResult<Page<Reservation>> {
        self.find_page(&ReservationFilter::EndDate(end_date), page)
    }

    pub fn save(&self, dto: &ReservationRegister) -> ServiceResult<Reservation> {
        let draft = ReservationDraft::from(dto);
        let id = self
            .repo
            .insert_reservation(&draft)
            .map_err(ServiceError::unexpected(
                "Unexpected error while saving reservation.",
            ))?;

        info!(
            "event=reservation_saved module=reservation status=ok reservation_id={} users={} rooms={}",
            id,
            draft.user_ids.len(),
            draft.room_ids.len()
        );
        self.find_by_id(id)
    }

    /// Copies every DTO field except the id onto the stored reservation;
    /// both child collections are replaced.
    pub fn update(&self, id: ReservationId, dto: &ReservationRegister) -> ServiceResult<Reservation> {
        self.ensure_exists(id)?;
        let draft = ReservationDraft::from(dto);
        self.repo
            .update_reservation(id, &draft)
            .map_err(|err| match err {
                RepoError::NotFound { .. } => ServiceError::not_found(reservation_not_found(id)),
                err => ServiceError::Unexpected {
                    message: "Unexpected error while updating reservation.",
                    source: err,
                },
            })?;

        info!("event=reservation_updated module=reservation status=ok reservation_id={id}");
        self.find_by_id(id)
    }

    pub fn delete_by_id(&self, id: ReservationId) -> ServiceResult<()> {
        self.ensure_exists(id)?;
        self.repo.delete_reservation(id).map_err(|err| match err {
            RepoError::NotFound { .. } => ServiceError::not_found(reservation_not_found(id)),
            err => ServiceError::Unexpected {
                message: "Unexpected error while deleting the reservation.",
                source: err,
            },
        })?;

        info!("event=reservation_deleted module=reservation status=ok reservation_id={id}");
        Ok(())
    }

    fn find_page(
        &self,
        filter: &ReservationFilter,
        page: PageRequest,
    ) -> ServiceResult<Page<Reservation>> {
        self.repo
            .find_reservation_page(filter, page)
            .map_err(ServiceError::unexpected(LOAD_FAILED))
    }

    fn ensure_exists(&self, id: ReservationId) -> ServiceResult<()> {
        let exists = self
            .repo
            .reservation_exists(id)
            .map_err(ServiceError::unexpected(LOAD_FAILED))?;
        if !exists {
            return Err(ServiceError::not_found(reservation_not_found(id)));
        }
        Ok(())
    }
}

fn reservation_not_found(id: ReservationId) -> String {
    format!("Reservation with id {id} not found.")
}
