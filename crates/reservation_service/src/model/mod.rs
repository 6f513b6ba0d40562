//! Reservation service domain model and request DTOs.
//!
//! # Invariants
//! - A reservation owns its user and room rows; they never outlive it.
//! - `created_at` never changes after insert; `updated_at` moves on every write.

pub mod dto;
pub mod reservation;

pub use dto::{ReservationRegister, RoomReservationRegister, UserReservationRegister};
pub use reservation::{
    Reservation, ReservationDraft, ReservationId, RoomReservation, UserReservation,
};
