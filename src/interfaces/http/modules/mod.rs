pub mod health;
pub mod reservations;
pub mod users;
pub mod vehicles;
