//! Reservation use cases.

pub mod reservation_service;

pub use reservation_service::ReservationService;
