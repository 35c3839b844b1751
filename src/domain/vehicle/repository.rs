//! Vehicle repository interfaces

use async_trait::async_trait;

use super::model::{NewVehicleModel, Position, Vehicle, VehicleModel};
use crate::domain::DomainResult;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Insert a new vehicle; an existing id is a `Conflict`
    async fn save(&self, vehicle: Vehicle) -> DomainResult<()>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Vehicle>>;
    /// All vehicles ordered by id
    async fn find_all(&self) -> DomainResult<Vec<Vehicle>>;
    /// Overwrite the stored position (last write wins)
    async fn set_position(&self, id: &str, position: Position) -> DomainResult<()>;
}

#[async_trait]
pub trait VehicleModelRepository: Send + Sync {
    async fn create(&self, model: NewVehicleModel) -> DomainResult<VehicleModel>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<VehicleModel>>;
    async fn find_all(&self) -> DomainResult<Vec<VehicleModel>>;
}
