//! HTTP routes of the reservation service.

mod reservation;

use crate::repo::SqliteReservationRepository;
use crate::service::ReservationService;
use axum::routing::{delete, get, post, put};
use axum::Router;
use hotel_core::{DbHandle, ServiceError, ServiceResult};
use rusqlite::Connection;

/// Builds the reservation service router over `db`.
pub fn router(db: DbHandle) -> Router {
    Router::new()
        .route("/reservations", get(reservation::find_all))
        .route("/reservations/create", post(reservation::create))
        .route("/reservations/update/:id", put(reservation::update))
        .route("/reservations/delete/:id", delete(reservation::delete))
        .route(
            "/reservations/by-user/:user_id",
            get(reservation::find_by_user_id),
        )
        .route(
            "/reservations/by-start-date",
            get(reservation::find_by_start_date),
        )
        .route("/reservations/by-end-date", get(reservation::find_by_end_date))
        .route("/reservations/:id", get(reservation::find_by_id))
        .with_state(db)
}

fn reservation_service(
    conn: &Connection,
) -> ServiceResult<ReservationService<SqliteReservationRepository<'_>>> {
    let repo = SqliteReservationRepository::try_new(conn)
        .map_err(ServiceError::unexpected("Reservation storage is not ready"))?;
    Ok(ReservationService::new(repo))
}
