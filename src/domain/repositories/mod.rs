//! Repository access for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use async_trait::async_trait;

use super::lock::TransitionRepository;
use super::reservation::ReservationRepository;
use super::user::UserRepository;
use super::vehicle::{VehicleModelRepository, VehicleRepository};

pub use crate::shared::errors::DomainResult;

/// Provides access to all domain repositories.
///
/// Constructed once at startup and passed down as `Arc<dyn RepositoryProvider>`:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let car = repos.vehicles().find_by_id("CAR001").await?;
///     let active = repos.reservations().find(&ReservationFilter::active()).await?;
/// }
/// ```
#[async_trait]
pub trait RepositoryProvider: Send + Sync {
    fn vehicles(&self) -> &dyn VehicleRepository;
    fn vehicle_models(&self) -> &dyn VehicleModelRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
    fn users(&self) -> &dyn UserRepository;
    fn transitions(&self) -> &dyn TransitionRepository;

    /// Round-trip to the backing store, used by health checks
    async fn ping(&self) -> DomainResult<()>;
}
