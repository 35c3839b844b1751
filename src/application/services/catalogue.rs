//! Fleet catalogue: vehicle models and vehicle registration

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::domain::{
    DomainError, DomainResult, NewVehicleModel, Position, RepositoryProvider, Vehicle,
    VehicleModel,
};

/// Vehicle together with its make/model record
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleDetails {
    pub vehicle: Vehicle,
    pub model: Option<VehicleModel>,
}

/// Registration data for a new vehicle
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub id: String,
    pub name: String,
    pub model_id: i32,
    pub cost_per_hour: Option<f64>,
    pub position: Option<(f64, f64)>,
}

pub struct CatalogueService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CatalogueService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create_model(&self, model: NewVehicleModel) -> DomainResult<VehicleModel> {
        if model.make.trim().is_empty() || model.model.trim().is_empty() {
            return Err(DomainError::Validation(
                "make and model must not be empty".to_string(),
            ));
        }
        let created = self.repos.vehicle_models().create(model).await?;
        info!(
            "Vehicle model {} registered: {} {} ({})",
            created.id, created.make, created.model, created.year
        );
        Ok(created)
    }

    pub async fn list_models(&self) -> DomainResult<Vec<VehicleModel>> {
        self.repos.vehicle_models().find_all().await
    }

    /// Register a car. New cars start locked.
    pub async fn register_vehicle(&self, new: NewVehicle) -> DomainResult<VehicleDetails> {
        if new.id.trim().is_empty() {
            return Err(DomainError::Validation("vehicle id must not be empty".into()));
        }
        if new.cost_per_hour.is_some_and(|c| !c.is_finite() || c < 0.0) {
            return Err(DomainError::Validation(
                "cost_per_hour must be a non-negative number".into(),
            ));
        }

        let model = self
            .repos
            .vehicle_models()
            .find_by_id(new.model_id)
            .await?
            .ok_or_else(|| DomainError::not_found("VehicleModel", "id", new.model_id))?;

        let mut vehicle = Vehicle::new(new.id, new.name, new.model_id);
        vehicle.cost_per_hour = new.cost_per_hour;
        vehicle.position = new
            .position
            .map(|(lat, long)| Position::new(lat, long))
            .transpose()?;

        self.repos.vehicles().save(vehicle.clone()).await?;
        info!("Vehicle {} registered ({})", vehicle.id, vehicle.name);

        Ok(VehicleDetails {
            vehicle,
            model: Some(model),
        })
    }

    pub async fn get_vehicle(&self, id: &str) -> DomainResult<VehicleDetails> {
        let vehicle = self
            .repos
            .vehicles()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", "id", id))?;
        let model = self.repos.vehicle_models().find_by_id(vehicle.model_id).await?;
        Ok(VehicleDetails { vehicle, model })
    }

    pub async fn list_vehicles(&self) -> DomainResult<Vec<VehicleDetails>> {
        let vehicles = self.repos.vehicles().find_all().await?;
        self.describe(vehicles).await
    }

    /// Attach model records to vehicles with one model lookup.
    pub async fn describe(&self, vehicles: Vec<Vehicle>) -> DomainResult<Vec<VehicleDetails>> {
        let models: HashMap<i32, VehicleModel> = self
            .repos
            .vehicle_models()
            .find_all()
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        Ok(vehicles
            .into_iter()
            .map(|vehicle| {
                let model = models.get(&vehicle.model_id).cloned();
                VehicleDetails { vehicle, model }
            })
            .collect())
    }
}
