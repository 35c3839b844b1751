pub mod guard;
pub mod services;

// Re-export key types for convenience
pub use guard::{SharedVehicleGuards, VehicleGuard, VehicleGuards};
pub use services::{
    BookingService, CatalogueService, FleetService, LockChangeOutcome, LockReceipt, NewUser,
    NewVehicle, UserService, VehicleCommand, VehicleCommandResult, VehicleDetails,
};
