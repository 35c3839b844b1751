//! # Car-share booking and lock coordination
//!
//! Books cars for time windows and decides whether a lock or unlock request
//! from a user is backed by a booking. Unlocking is allowed from the start
//! of an active booking; locking an unlocked car again completes it.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Entities, the overlap predicate, position bounds and the
//!   repository ports
//! - **application**: Fleet, booking, catalogue and user services plus the
//!   per-vehicle guard
//! - **infrastructure**: SeaORM storage, the in-memory adapter and password
//!   hashing
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Startup and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryStorage, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::create_api_router;
