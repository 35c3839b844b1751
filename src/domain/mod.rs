pub mod lock;
pub mod repositories;
pub mod reservation;
pub mod user;
pub mod vehicle;

// Re-export commonly used types
pub use lock::{LockAuthorization, LockTransition, TransitionRepository};
pub use repositories::{DomainResult, RepositoryProvider};
pub use reservation::{
    NewReservation, Reservation, ReservationFilter, ReservationRepository, ReservationStatus,
    TimeWindow,
};
pub use user::{User, UserRepository};
pub use vehicle::{
    NewVehicleModel, Position, Vehicle, VehicleModel, VehicleModelRepository, VehicleRepository,
};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
