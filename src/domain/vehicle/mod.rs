//! Vehicle aggregate
//!
//! Vehicles, their shared make/model records, and repository interfaces.

pub mod model;
pub mod repository;

pub use model::{NewVehicleModel, Position, Vehicle, VehicleModel, LATITUDE_BOUNDS, LONGITUDE_BOUNDS};
pub use repository::{VehicleModelRepository, VehicleRepository};
