//! Vehicles module: catalogue, availability, lock and position commands

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
