//! SeaORM implementation of VehicleModelRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, QueryOrder, Set};

use super::db_err;
use crate::domain::{DomainResult, NewVehicleModel, VehicleModel, VehicleModelRepository};
use crate::infrastructure::database::entities::vehicle_model;

pub struct SeaOrmVehicleModelRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleModelRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: vehicle_model::Model) -> VehicleModel {
    VehicleModel {
        id: m.id,
        make: m.make,
        model: m.model_name,
        year: m.year,
        capacity: m.capacity,
        colour: m.colour,
    }
}

#[async_trait]
impl VehicleModelRepository for SeaOrmVehicleModelRepository {
    async fn create(&self, m: NewVehicleModel) -> DomainResult<VehicleModel> {
        let model = vehicle_model::ActiveModel {
            id: NotSet,
            make: Set(m.make),
            model_name: Set(m.model),
            year: Set(m.year),
            capacity: Set(m.capacity),
            colour: Set(m.colour),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<VehicleModel>> {
        let model = vehicle_model::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<VehicleModel>> {
        let models = vehicle_model::Entity::find()
            .order_by_asc(vehicle_model::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::repositories::test_support;

    #[tokio::test]
    async fn ids_are_assigned_on_insert() {
        let repo = SeaOrmVehicleModelRepository::new(test_support::database().await);
        let first = repo
            .create(NewVehicleModel {
                make: "Toyota".into(),
                model: "Corolla".into(),
                year: 2019,
                capacity: 5,
                colour: "White".into(),
            })
            .await
            .unwrap();
        let second = repo
            .create(NewVehicleModel {
                make: "Tesla".into(),
                model: "Model 3".into(),
                year: 2022,
                capacity: 5,
                colour: "Red".into(),
            })
            .await
            .unwrap();

        assert!(second.id > first.id);
        assert_eq!(repo.find_by_id(first.id).await.unwrap(), Some(first.clone()));
        assert_eq!(repo.find_all().await.unwrap(), vec![first, second]);
    }
}
