//! SeaORM implementation of RepositoryProvider

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::{
    DomainResult, ReservationRepository, TransitionRepository, UserRepository,
    VehicleModelRepository, VehicleRepository,
};

use super::db_err;
use super::reservation_repository::SeaOrmReservationRepository;
use super::transition_repository::SeaOrmTransitionRepository;
use super::user_repository::SeaOrmUserRepository;
use super::vehicle_model_repository::SeaOrmVehicleModelRepository;
use super::vehicle_repository::SeaOrmVehicleRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let car = repos.vehicles().find_by_id("CAR001").await?;
/// let mine = repos.reservations().find(&ReservationFilter::default().held_by(email)).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    db: DatabaseConnection,
    vehicles: SeaOrmVehicleRepository,
    vehicle_models: SeaOrmVehicleModelRepository,
    reservations: SeaOrmReservationRepository,
    users: SeaOrmUserRepository,
    transitions: SeaOrmTransitionRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            vehicles: SeaOrmVehicleRepository::new(db.clone()),
            vehicle_models: SeaOrmVehicleModelRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db.clone()),
            transitions: SeaOrmTransitionRepository::new(db.clone()),
            db,
        }
    }
}

#[async_trait]
impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }

    fn vehicle_models(&self) -> &dyn VehicleModelRepository {
        &self.vehicle_models
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn transitions(&self) -> &dyn TransitionRepository {
        &self.transitions
    }

    async fn ping(&self) -> DomainResult<()> {
        self.db.ping().await.map_err(db_err)
    }
}
