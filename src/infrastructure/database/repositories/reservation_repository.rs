//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, NotSet,
    QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::reservation::{
    NewReservation, Reservation, ReservationFilter, ReservationRepository, ReservationStatus,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{reservation, vehicle};

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: i32) -> DomainResult<reservation::Model> {
        reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Reservation", "id", id))
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> Reservation {
    Reservation {
        id: m.id,
        user_id: m.user_email,
        vehicle_id: m.vehicle_id,
        start: m.starts_at,
        end: m.ends_at,
        status: m.status.into(),
        event_id: m.event_id,
        created_at: m.created_at,
    }
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn create(&self, r: NewReservation) -> DomainResult<Reservation> {
        debug!("Saving reservation: vehicle={}, user={}", r.vehicle_id, r.user_id);

        let model = reservation::ActiveModel {
            id: NotSet,
            user_email: Set(r.user_id),
            vehicle_id: Set(r.vehicle_id),
            starts_at: Set(r.window.start()),
            ends_at: Set(r.window.end()),
            status: Set(ReservationStatus::Active.into()),
            event_id: Set(r.event_id),
            created_at: Set(Utc::now()),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find(&self, filter: &ReservationFilter) -> DomainResult<Vec<Reservation>> {
        let mut query = reservation::Entity::find();

        if let Some(vehicle_id) = &filter.vehicle_id {
            query = query.filter(reservation::Column::VehicleId.eq(vehicle_id.as_str()));
        }
        if let Some(user_id) = &filter.user_id {
            query = query.filter(reservation::Column::UserEmail.eq(user_id.as_str()));
        }
        if let Some(status) = filter.status {
            query = query.filter(reservation::Column::Status.eq(reservation::Status::from(status)));
        }
        if let Some(locked) = filter.vehicle_locked {
            query = query
                .inner_join(vehicle::Entity)
                .filter(vehicle::Column::Locked.eq(locked));
        }

        let models = query
            .order_by_asc(reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn set_status(&self, id: i32, status: ReservationStatus) -> DomainResult<Reservation> {
        debug!("Updating reservation {} status: {}", id, status);

        let mut model = self.find_model(id).await?.into_active_model();
        model.status = Set(status.into());
        let updated = model.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(updated))
    }

    async fn set_event_id(&self, id: i32, event_id: &str) -> DomainResult<Reservation> {
        let mut model = self.find_model(id).await?.into_active_model();
        model.event_id = Set(Some(event_id.to_string()));
        let updated = model.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(updated))
    }
}
