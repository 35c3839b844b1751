//! SeaORM implementation of TransitionRepository
//!
//! Both updates run in one transaction and each carries its expected prior
//! state in the WHERE clause, so a stale transition affects zero rows and is
//! rolled back.

use async_trait::async_trait;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, QueryFilter,
    TransactionTrait,
};

use super::db_err;
use crate::domain::{DomainError, DomainResult, LockTransition, TransitionRepository};
use crate::infrastructure::database::entities::{reservation, vehicle};

pub struct SeaOrmTransitionRepository {
    db: DatabaseConnection,
}

impl SeaOrmTransitionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

async fn flip_lock(txn: &DatabaseTransaction, t: &LockTransition) -> DomainResult<()> {
    let result = vehicle::Entity::update_many()
        .col_expr(vehicle::Column::Locked, Expr::value(t.locked))
        .filter(vehicle::Column::Id.eq(t.vehicle_id.as_str()))
        .filter(vehicle::Column::Locked.eq(!t.locked))
        .exec(txn)
        .await
        .map_err(db_err)?;

    if result.rows_affected == 1 {
        return Ok(());
    }

    let exists = vehicle::Entity::find_by_id(t.vehicle_id.clone())
        .one(txn)
        .await
        .map_err(db_err)?
        .is_some();
    if exists {
        Err(DomainError::Conflict(format!(
            "Vehicle {} is already {}",
            t.vehicle_id,
            if t.locked { "locked" } else { "unlocked" }
        )))
    } else {
        Err(DomainError::not_found("Vehicle", "id", &t.vehicle_id))
    }
}

async fn complete_reservation(txn: &DatabaseTransaction, id: i32) -> DomainResult<()> {
    let result = reservation::Entity::update_many()
        .col_expr(
            reservation::Column::Status,
            Expr::value(reservation::Status::Completed.to_value()),
        )
        .filter(reservation::Column::Id.eq(id))
        .filter(reservation::Column::Status.eq(reservation::Status::Active))
        .exec(txn)
        .await
        .map_err(db_err)?;

    if result.rows_affected == 1 {
        Ok(())
    } else {
        Err(DomainError::Conflict(format!(
            "Reservation {} is no longer active",
            id
        )))
    }
}

#[async_trait]
impl TransitionRepository for SeaOrmTransitionRepository {
    async fn apply(&self, t: &LockTransition) -> DomainResult<()> {
        debug!(
            "Applying lock transition: vehicle={}, locked={}, completes={:?}",
            t.vehicle_id, t.locked, t.completes
        );

        let txn = self.db.begin().await.map_err(db_err)?;

        let outcome = match flip_lock(&txn, t).await {
            Ok(()) => match t.completes {
                Some(id) => complete_reservation(&txn, id).await,
                None => Ok(()),
            },
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => txn.commit().await.map_err(db_err),
            Err(e) => {
                txn.rollback().await.map_err(db_err)?;
                Err(e)
            }
        }
    }
}
