//! Lock/unlock transitions of a vehicle gated by reservations

pub mod model;
pub mod repository;

pub use model::{LockAuthorization, LockTransition};
pub use repository::TransitionRepository;
