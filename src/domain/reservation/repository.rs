//! Reservation repository interface

use async_trait::async_trait;

use super::model::{NewReservation, Reservation, ReservationStatus};
use crate::domain::DomainResult;

/// Storage-side narrowing of reservation queries. Every set field is an
/// equality predicate, so adapters can push the whole filter into one
/// indexed query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationFilter {
    pub vehicle_id: Option<String>,
    pub user_id: Option<String>,
    pub status: Option<ReservationStatus>,
    /// Current lock state of the reserved vehicle (joined on the vehicle)
    pub vehicle_locked: Option<bool>,
}

impl ReservationFilter {
    pub fn active() -> Self {
        Self {
            status: Some(ReservationStatus::Active),
            ..Self::default()
        }
    }

    pub fn for_vehicle(mut self, vehicle_id: impl Into<String>) -> Self {
        self.vehicle_id = Some(vehicle_id.into());
        self
    }

    pub fn held_by(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn vehicle_locked(mut self, locked: bool) -> Self {
        self.vehicle_locked = Some(locked);
        self
    }

    /// Check the reservation's own columns. `vehicle_locked` needs the
    /// vehicle and is left to the caller.
    pub fn matches(&self, r: &Reservation) -> bool {
        self.vehicle_id.as_ref().map_or(true, |v| *v == r.vehicle_id)
            && self.user_id.as_ref().map_or(true, |u| *u == r.user_id)
            && self.status.map_or(true, |s| s == r.status)
    }
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Store a new reservation with status `Active`, assigning its id
    async fn create(&self, reservation: NewReservation) -> DomainResult<Reservation>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>>;

    /// Reservations matching the filter, ordered by id
    async fn find(&self, filter: &ReservationFilter) -> DomainResult<Vec<Reservation>>;

    async fn set_status(&self, id: i32, status: ReservationStatus) -> DomainResult<Reservation>;

    async fn set_event_id(&self, id: i32, event_id: &str) -> DomainResult<Reservation>;
}
