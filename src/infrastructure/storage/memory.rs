//! In-memory storage implementation

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::{
    DomainError, DomainResult, LockTransition, NewReservation, NewVehicleModel, Position,
    RepositoryProvider, Reservation, ReservationFilter, ReservationRepository, ReservationStatus,
    TransitionRepository, User, UserRepository, Vehicle, VehicleModel, VehicleModelRepository,
    VehicleRepository,
};

/// In-memory storage for development and testing.
///
/// Implements every repository trait itself, so the provider accessors hand
/// out `self`.
pub struct InMemoryStorage {
    vehicles: DashMap<String, Vehicle>,
    vehicle_models: DashMap<i32, VehicleModel>,
    reservations: DashMap<i32, Reservation>,
    users: DashMap<String, User>,
    reservation_counter: AtomicI32,
    model_counter: AtomicI32,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            vehicles: DashMap::new(),
            vehicle_models: DashMap::new(),
            reservations: DashMap::new(),
            users: DashMap::new(),
            reservation_counter: AtomicI32::new(1),
            model_counter: AtomicI32::new(1),
        }
    }

    fn reservation_not_found(id: i32) -> DomainError {
        DomainError::not_found("Reservation", "id", id)
    }

    fn update_reservation<F>(&self, id: i32, apply: F) -> DomainResult<Reservation>
    where
        F: FnOnce(&mut Reservation),
    {
        let mut entry = self
            .reservations
            .get_mut(&id)
            .ok_or_else(|| Self::reservation_not_found(id))?;
        apply(&mut entry);
        Ok(entry.clone())
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryStorage {
    async fn save(&self, vehicle: Vehicle) -> DomainResult<()> {
        use dashmap::mapref::entry::Entry;

        match self.vehicles.entry(vehicle.id.clone()) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "Vehicle {} already exists",
                vehicle.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(vehicle);
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Vehicle>> {
        Ok(self.vehicles.get(id).map(|v| v.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Vehicle>> {
        let mut vehicles: Vec<Vehicle> = self.vehicles.iter().map(|v| v.clone()).collect();
        vehicles.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(vehicles)
    }

    async fn set_position(&self, id: &str, position: Position) -> DomainResult<()> {
        let mut vehicle = self
            .vehicles
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found("Vehicle", "id", id))?;
        vehicle.position = Some(position);
        Ok(())
    }
}

#[async_trait]
impl VehicleModelRepository for InMemoryStorage {
    async fn create(&self, model: NewVehicleModel) -> DomainResult<VehicleModel> {
        let id = self.model_counter.fetch_add(1, Ordering::SeqCst);
        let stored = VehicleModel {
            id,
            make: model.make,
            model: model.model,
            year: model.year,
            capacity: model.capacity,
            colour: model.colour,
        };
        self.vehicle_models.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<VehicleModel>> {
        Ok(self.vehicle_models.get(&id).map(|m| m.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<VehicleModel>> {
        let mut models: Vec<VehicleModel> =
            self.vehicle_models.iter().map(|m| m.clone()).collect();
        models.sort_by_key(|m| m.id);
        Ok(models)
    }
}

#[async_trait]
impl ReservationRepository for InMemoryStorage {
    async fn create(&self, reservation: NewReservation) -> DomainResult<Reservation> {
        let id = self.reservation_counter.fetch_add(1, Ordering::SeqCst);
        let stored = Reservation {
            id,
            user_id: reservation.user_id,
            vehicle_id: reservation.vehicle_id,
            start: reservation.window.start(),
            end: reservation.window.end(),
            status: ReservationStatus::Active,
            event_id: reservation.event_id,
            created_at: Utc::now(),
        };
        self.reservations.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.get(&id).map(|r| r.clone()))
    }

    async fn find(&self, filter: &ReservationFilter) -> DomainResult<Vec<Reservation>> {
        // Collect first so no reservation shard is held while vehicles are read.
        let mut found: Vec<Reservation> = self
            .reservations
            .iter()
            .filter(|r| filter.matches(r))
            .map(|r| r.clone())
            .collect();

        if let Some(locked) = filter.vehicle_locked {
            found.retain(|r| {
                self.vehicles
                    .get(&r.vehicle_id)
                    .is_some_and(|v| v.locked == locked)
            });
        }

        found.sort_by_key(|r| r.id);
        Ok(found)
    }

    async fn set_status(&self, id: i32, status: ReservationStatus) -> DomainResult<Reservation> {
        self.update_reservation(id, |r| r.status = status)
    }

    async fn set_event_id(&self, id: i32, event_id: &str) -> DomainResult<Reservation> {
        self.update_reservation(id, |r| r.event_id = Some(event_id.to_string()))
    }
}

#[async_trait]
impl UserRepository for InMemoryStorage {
    async fn create(&self, user: User) -> DomainResult<()> {
        use dashmap::mapref::entry::Entry;

        match self.users.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "User {} already registered",
                user.email
            ))),
            Entry::Vacant(slot) => {
                slot.insert(user);
                Ok(())
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(email).map(|u| u.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|u| u.clone()).collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }
}

#[async_trait]
impl TransitionRepository for InMemoryStorage {
    async fn apply(&self, transition: &LockTransition) -> DomainResult<()> {
        // The vehicle entry stays write-locked until both changes are made.
        let mut vehicle = self
            .vehicles
            .get_mut(&transition.vehicle_id)
            .ok_or_else(|| DomainError::not_found("Vehicle", "id", &transition.vehicle_id))?;

        if vehicle.locked == transition.locked {
            return Err(DomainError::Conflict(format!(
                "Vehicle {} is already {}",
                vehicle.id,
                vehicle.lock_state_str()
            )));
        }

        if let Some(id) = transition.completes {
            let mut reservation = self
                .reservations
                .get_mut(&id)
                .ok_or_else(|| Self::reservation_not_found(id))?;
            if !reservation.is_active() {
                return Err(DomainError::Conflict(format!(
                    "Reservation {} is already {}",
                    id, reservation.status
                )));
            }
            reservation.status = ReservationStatus::Completed;
        }

        vehicle.locked = transition.locked;
        Ok(())
    }
}

#[async_trait]
impl RepositoryProvider for InMemoryStorage {
    fn vehicles(&self) -> &dyn VehicleRepository {
        self
    }

    fn vehicle_models(&self) -> &dyn VehicleModelRepository {
        self
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        self
    }

    fn users(&self) -> &dyn UserRepository {
        self
    }

    fn transitions(&self) -> &dyn TransitionRepository {
        self
    }

    async fn ping(&self) -> DomainResult<()> {
        Ok(())
    }
}
