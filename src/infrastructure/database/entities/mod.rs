//! Database entities module

pub mod reservation;
pub mod user;
pub mod vehicle;
pub mod vehicle_model;

pub use reservation::Entity as Reservation;
pub use user::Entity as User;
pub use vehicle::Entity as Vehicle;
pub use vehicle_model::Entity as VehicleModel;
