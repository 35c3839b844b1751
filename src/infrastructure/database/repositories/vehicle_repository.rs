//! SeaORM implementation of VehicleRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
};

use super::{db_err, insert_err};
use crate::domain::{DomainError, DomainResult, Position, Vehicle, VehicleRepository};
use crate::infrastructure::database::entities::vehicle;

pub struct SeaOrmVehicleRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: vehicle::Model) -> DomainResult<Vehicle> {
    let position = match (m.latitude, m.longitude) {
        (Some(lat), Some(long)) => Some(Position::new(lat, long).map_err(|e| {
            DomainError::Integrity(format!("Vehicle {} has a stored position that {}", m.id, e))
        })?),
        _ => None,
    };
    Ok(Vehicle {
        id: m.id,
        name: m.name,
        model_id: m.model_id,
        locked: m.locked,
        cost_per_hour: m.cost_per_hour,
        position,
    })
}

// ── VehicleRepository impl ──────────────────────────────────────

#[async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn save(&self, v: Vehicle) -> DomainResult<()> {
        debug!("Saving vehicle: {}", v.id);

        let key = v.id.clone();
        let model = vehicle::ActiveModel {
            id: Set(v.id),
            name: Set(v.name),
            model_id: Set(v.model_id),
            locked: Set(v.locked),
            cost_per_hour: Set(v.cost_per_hour),
            latitude: Set(v.position.map(|p| p.latitude())),
            longitude: Set(v.position.map(|p| p.longitude())),
        };
        model
            .insert(&self.db)
            .await
            .map_err(|e| insert_err("Vehicle", &key, e))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Vehicle>> {
        vehicle::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(model_to_domain)
            .transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Vehicle>> {
        vehicle::Entity::find()
            .order_by_asc(vehicle::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    async fn set_position(&self, id: &str, position: Position) -> DomainResult<()> {
        debug!(
            "Updating position of {}: {}, {}",
            id,
            position.latitude(),
            position.longitude()
        );

        let existing = vehicle::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Vehicle", "id", id))?;

        let mut model = existing.into_active_model();
        model.latitude = Set(Some(position.latitude()));
        model.longitude = Set(Some(position.longitude()));
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
