//! Booking–lock coordination engine
//!
//! Answers which cars are free for a window, and decides whether a user may
//! lock or unlock a car right now based on their outstanding reservations.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::application::guard::SharedVehicleGuards;
use crate::domain::{
    DomainError, DomainResult, LockAuthorization, LockTransition, Position, RepositoryProvider,
    Reservation, ReservationFilter, TimeWindow, Vehicle,
};

/// Confirmation of an applied lock transition
#[derive(Debug, Clone, PartialEq)]
pub struct LockReceipt {
    pub vehicle_id: String,
    pub locked: bool,
    /// Reservation completed by this transition (locking only)
    pub completed_reservation: Option<i32>,
    pub message: String,
}

/// Result of a lock change request
#[derive(Debug, Clone, PartialEq)]
pub enum LockChangeOutcome {
    Applied(LockReceipt),
    /// No eligible reservation; nothing was changed
    NoneFound,
    /// Several eligible reservations; nothing was changed
    MultipleFound(Vec<i32>),
}

/// Operations a car (or the agent acting for it) can request
#[derive(Debug, Clone, PartialEq)]
pub enum VehicleCommand {
    ChangeLock { user_id: String, locked: bool },
    ReportPosition { latitude: f64, longitude: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum VehicleCommandResult {
    Lock(LockChangeOutcome),
    Position(Vehicle),
}

/// Service for availability and lock transitions
pub struct FleetService {
    repos: Arc<dyn RepositoryProvider>,
    guards: SharedVehicleGuards,
}

impl FleetService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, guards: SharedVehicleGuards) -> Self {
        Self { repos, guards }
    }

    /// Single entry point for vehicle commands.
    pub async fn dispatch(
        &self,
        vehicle_id: &str,
        command: VehicleCommand,
    ) -> DomainResult<VehicleCommandResult> {
        match command {
            VehicleCommand::ChangeLock { user_id, locked } => self
                .request_lock_change(vehicle_id, &user_id, locked)
                .await
                .map(VehicleCommandResult::Lock),
            VehicleCommand::ReportPosition {
                latitude,
                longitude,
            } => self
                .update_position(vehicle_id, latitude, longitude)
                .await
                .map(VehicleCommandResult::Position),
        }
    }

    /// Vehicles with no active reservation overlapping `window`, ordered by id.
    pub async fn find_available(&self, window: &TimeWindow) -> DomainResult<Vec<Vehicle>> {
        let active = self
            .repos
            .reservations()
            .find(&ReservationFilter::active())
            .await?;

        let booked: HashSet<String> = active
            .into_iter()
            .filter(|r| r.window().overlaps(window))
            .map(|r| r.vehicle_id)
            .collect();

        let vehicles = self.repos.vehicles().find_all().await?;
        debug!(
            booked = booked.len(),
            total = vehicles.len(),
            "availability computed"
        );

        Ok(vehicles
            .into_iter()
            .filter(|v| !booked.contains(&v.id))
            .collect())
    }

    /// Lock or unlock a car on behalf of a reservation holder.
    pub async fn request_lock_change(
        &self,
        vehicle_id: &str,
        user_id: &str,
        locked: bool,
    ) -> DomainResult<LockChangeOutcome> {
        if self.repos.vehicles().find_by_id(vehicle_id).await?.is_none() {
            return Err(DomainError::not_found("Vehicle", "id", vehicle_id));
        }

        let _guard = self.guards.acquire(vehicle_id).await?;
        let now = Utc::now();

        match self.validate(vehicle_id, user_id, locked, now).await? {
            LockAuthorization::Authorized(reservation) => {
                let receipt = self.execute(vehicle_id, locked, &reservation).await?;
                Ok(LockChangeOutcome::Applied(receipt))
            }
            LockAuthorization::NoneFound => {
                info!(vehicle_id, user_id, locked, "no valid bookings for lock change");
                Ok(LockChangeOutcome::NoneFound)
            }
            LockAuthorization::MultipleFound(ids) => {
                error!(
                    vehicle_id,
                    user_id,
                    reservations = ?ids,
                    "multiple active bookings authorize the same lock change"
                );
                Ok(LockChangeOutcome::MultipleFound(ids))
            }
        }
    }

    /// Find the single reservation allowing `user_id` to move `vehicle_id`
    /// into the `requested_locked` state at `now`.
    ///
    /// The car must currently be in the opposite state; only reservations
    /// that have started count, with no check on their end.
    pub async fn validate(
        &self,
        vehicle_id: &str,
        user_id: &str,
        requested_locked: bool,
        now: DateTime<Utc>,
    ) -> DomainResult<LockAuthorization> {
        let filter = ReservationFilter::active()
            .for_vehicle(vehicle_id)
            .held_by(user_id)
            .vehicle_locked(!requested_locked);

        let mut started: Vec<Reservation> = self
            .repos
            .reservations()
            .find(&filter)
            .await?
            .into_iter()
            .filter(|r| r.has_started(now))
            .collect();

        Ok(match started.len() {
            0 => LockAuthorization::NoneFound,
            1 => LockAuthorization::Authorized(started.remove(0)),
            _ => LockAuthorization::MultipleFound(started.iter().map(|r| r.id).collect()),
        })
    }

    /// Apply an authorized transition. Performs no re-validation.
    pub async fn execute(
        &self,
        vehicle_id: &str,
        requested_locked: bool,
        authorized: &Reservation,
    ) -> DomainResult<LockReceipt> {
        let transition = LockTransition::authorized_by(authorized, requested_locked);
        self.repos.transitions().apply(&transition).await?;

        let state = if requested_locked { "locked" } else { "unlocked" };
        let mut message = format!("Successful: car is {}", state);
        if transition.completes.is_some() {
            message.push_str(", booking has been completed");
        }

        info!(
            vehicle_id,
            reservation_id = authorized.id,
            locked = requested_locked,
            "lock transition applied"
        );

        Ok(LockReceipt {
            vehicle_id: vehicle_id.to_string(),
            locked: requested_locked,
            completed_reservation: transition.completes,
            message,
        })
    }

    /// Record a new position for a car. Last write wins.
    pub async fn update_position(
        &self,
        vehicle_id: &str,
        latitude: f64,
        longitude: f64,
    ) -> DomainResult<Vehicle> {
        let mut vehicle = self
            .repos
            .vehicles()
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", "id", vehicle_id))?;

        let position = Position::new(latitude, longitude).map_err(|e| {
            warn!(vehicle_id, latitude, longitude, "rejected position report");
            e
        })?;

        self.repos
            .vehicles()
            .set_position(vehicle_id, position)
            .await?;
        vehicle.position = Some(position);

        debug!(vehicle_id, latitude, longitude, "position updated");
        Ok(vehicle)
    }
}
