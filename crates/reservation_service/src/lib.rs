//! Reservation service: bookings that tie a user to rooms over a date range.
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
    name: "reservation_service",
    env_prefix: "RESERVATION",
    port: 8082,
};

pub use api::router;
pub use db::{open_db, open_db_in_memory, MIGRATIONS};
pub use repo::{ReservationFilter, ReservationRepository, SqliteReservationRepository};
pub use service::ReservationService;
