//! Reservation repository.
//!
//! # Invariants
//! - A reservation row and its child rows are written in one transaction.
//! - Updates replace both child collections; rows not in the draft are gone.

pub mod reservation_repo;

pub use reservation_repo::{ReservationFilter, ReservationRepository, SqliteReservationRepository};
