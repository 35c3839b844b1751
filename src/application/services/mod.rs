//! Application services

mod booking;
mod catalogue;
mod fleet;
mod users;

pub use booking::BookingService;
pub use catalogue::{CatalogueService, NewVehicle, VehicleDetails};
pub use fleet::{FleetService, LockChangeOutcome, LockReceipt, VehicleCommand, VehicleCommandResult};
pub use users::{NewUser, UserService};
