//! Reservation aggregate
//!
//! Contains the Reservation entity, time windows, and repository interface.

pub mod model;
pub mod repository;
pub mod window;

pub use model::{NewReservation, Reservation, ReservationStatus};
pub use repository::{ReservationFilter, ReservationRepository};
pub use window::{overlaps, TimeWindow};
