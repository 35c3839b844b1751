//! Reservation (booking) management

use std::sync::Arc;

use tracing::info;

use crate::application::guard::SharedVehicleGuards;
use crate::domain::{
    DomainError, DomainResult, NewReservation, RepositoryProvider, Reservation,
    ReservationFilter, ReservationStatus, TimeWindow,
};

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    guards: SharedVehicleGuards,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, guards: SharedVehicleGuards) -> Self {
        Self { repos, guards }
    }

    /// Book a car for a window. The window must be non-empty and must not
    /// overlap another active booking of the same car.
    pub async fn create_reservation(&self, new: NewReservation) -> DomainResult<Reservation> {
        if new.window.start() >= new.window.end() {
            return Err(DomainError::Validation(
                "reservation start must be before its end".to_string(),
            ));
        }

        if self.repos.users().find_by_email(&new.user_id).await?.is_none() {
            return Err(DomainError::not_found("User", "email", &new.user_id));
        }
        if self.repos.vehicles().find_by_id(&new.vehicle_id).await?.is_none() {
            return Err(DomainError::not_found("Vehicle", "id", &new.vehicle_id));
        }

        let _guard = self.guards.acquire(&new.vehicle_id).await?;
        self.ensure_free(&new.vehicle_id, &new.window, None).await?;

        let reservation = self.repos.reservations().create(new).await?;
        info!(
            "Reservation {} created: vehicle={}, user={}, {} - {}",
            reservation.id,
            reservation.vehicle_id,
            reservation.user_id,
            reservation.start.to_rfc3339(),
            reservation.end.to_rfc3339()
        );
        Ok(reservation)
    }

    pub async fn get_reservation(&self, id: i32) -> DomainResult<Reservation> {
        self.repos
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reservation", "id", id))
    }

    /// All reservations, optionally narrowed to one holder and one status.
    pub async fn list_reservations(
        &self,
        user_id: Option<&str>,
        status: Option<ReservationStatus>,
    ) -> DomainResult<Vec<Reservation>> {
        let mut filter = ReservationFilter::default();
        if let Some(user_id) = user_id {
            filter = filter.held_by(user_id);
        }
        if let Some(status) = status {
            filter = filter.with_status(status);
        }
        self.repos.reservations().find(&filter).await
    }

    /// Move a reservation to `status`. Re-activating is refused when the car
    /// has been booked by someone else for an overlapping window meanwhile,
    /// and any change is refused if the status moved under us (for example a
    /// return completed it).
    pub async fn update_status(
        &self,
        id: i32,
        status: ReservationStatus,
    ) -> DomainResult<Reservation> {
        let seen = self.get_reservation(id).await?;
        let _guard = self.guards.acquire(&seen.vehicle_id).await?;

        // A lock transition may have completed it while we waited.
        let current = self.get_reservation(id).await?;
        if current.status != seen.status {
            return Err(DomainError::Conflict(format!(
                "Reservation {} changed to {} while the update was pending",
                id, current.status
            )));
        }
        if current.status == status {
            return Ok(current);
        }
        if status == ReservationStatus::Active {
            self.ensure_free(&current.vehicle_id, &current.window(), Some(id))
                .await?;
        }

        let updated = self.repos.reservations().set_status(id, status).await?;
        info!(
            "Reservation {} status changed: {} -> {}",
            id, current.status, updated.status
        );
        Ok(updated)
    }

    /// Correlate a reservation with an external calendar event.
    pub async fn set_event_id(&self, id: i32, event_id: &str) -> DomainResult<Reservation> {
        let event_id = event_id.trim();
        if event_id.is_empty() {
            return Err(DomainError::Validation("event_id must not be empty".into()));
        }
        self.repos.reservations().set_event_id(id, event_id).await
    }

    async fn ensure_free(
        &self,
        vehicle_id: &str,
        window: &TimeWindow,
        ignore: Option<i32>,
    ) -> DomainResult<()> {
        let filter = ReservationFilter::active().for_vehicle(vehicle_id);
        let clash = self
            .repos
            .reservations()
            .find(&filter)
            .await?
            .into_iter()
            .filter(|r| Some(r.id) != ignore)
            .find(|r| r.window().overlaps(window));

        match clash {
            Some(existing) => Err(DomainError::Conflict(format!(
                "Vehicle {} is already booked from {} to {} (reservation {})",
                vehicle_id,
                existing.start.to_rfc3339(),
                existing.end.to_rfc3339(),
                existing.id
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration as StdDuration;

    use chrono::{DateTime, Duration, Utc};

    use crate::application::guard::VehicleGuards;
    use crate::domain::{User, Vehicle};
    use crate::infrastructure::storage::InMemoryStorage;

    const USER: &str = "donald@gmail.com";

    async fn service() -> BookingService {
        service_with(Arc::new(VehicleGuards::new(StdDuration::from_secs(1)))).await
    }

    async fn service_with(guards: SharedVehicleGuards) -> BookingService {
        let storage = Arc::new(InMemoryStorage::new());
        storage
            .users()
            .create(User {
                email: USER.into(),
                first_name: "Donald".into(),
                last_name: "Duck".into(),
                password_hash: "x".into(),
            })
            .await
            .unwrap();
        storage
            .vehicles()
            .save(Vehicle::new("CAR001", "Corolla", 1))
            .await
            .unwrap();
        BookingService::new(storage, guards)
    }

    fn request(start: DateTime<Utc>, hours: i64) -> NewReservation {
        NewReservation {
            user_id: USER.into(),
            vehicle_id: "CAR001".into(),
            window: TimeWindow::new(start, start + Duration::hours(hours)).unwrap(),
            event_id: None,
        }
    }

    #[tokio::test]
    async fn new_reservation_is_active() {
        let svc = service().await;
        let r = svc.create_reservation(request(Utc::now(), 2)).await.unwrap();
        assert_eq!(r.status, ReservationStatus::Active);
        assert_eq!(svc.get_reservation(r.id).await.unwrap(), r);
    }

    #[tokio::test]
    async fn overlapping_booking_is_conflict() {
        let svc = service().await;
        let start = Utc::now() + Duration::days(1);
        svc.create_reservation(request(start, 2)).await.unwrap();

        let err = svc
            .create_reservation(request(start + Duration::hours(1), 2))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // Back-to-back is fine.
        svc.create_reservation(request(start + Duration::hours(2), 1))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn cancelled_booking_frees_the_window() {
        let svc = service().await;
        let start = Utc::now() + Duration::days(1);
        let first = svc.create_reservation(request(start, 2)).await.unwrap();
        svc.update_status(first.id, ReservationStatus::Cancelled)
            .await
            .unwrap();

        let second = svc.create_reservation(request(start, 2)).await.unwrap();

        // The cancelled one can no longer be re-activated over the new booking.
        let err = svc
            .update_status(first.id, ReservationStatus::Active)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(
            svc.get_reservation(second.id).await.unwrap().status,
            ReservationStatus::Active
        );
    }

    #[tokio::test]
    async fn empty_window_is_rejected() {
        let svc = service().await;
        let err = svc.create_reservation(request(Utc::now(), 0)).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn unknown_user_or_vehicle_is_not_found() {
        let svc = service().await;
        let mut r = request(Utc::now(), 1);
        r.user_id = "ghost@example.com".into();
        assert!(matches!(
            svc.create_reservation(r).await,
            Err(DomainError::NotFound { entity: "User", .. })
        ));

        let mut r = request(Utc::now(), 1);
        r.vehicle_id = "CAR999".into();
        assert!(matches!(
            svc.create_reservation(r).await,
            Err(DomainError::NotFound { entity: "Vehicle", .. })
        ));
    }

    #[tokio::test]
    async fn list_filters_by_user_and_status() {
        let svc = service().await;
        let start = Utc::now();
        let a = svc.create_reservation(request(start, 1)).await.unwrap();
        svc.create_reservation(request(start + Duration::hours(1), 1))
            .await
            .unwrap();
        svc.update_status(a.id, ReservationStatus::Completed)
            .await
            .unwrap();

        assert_eq!(svc.list_reservations(None, None).await.unwrap().len(), 2);
        assert_eq!(
            svc.list_reservations(Some(USER), Some(ReservationStatus::Completed))
                .await
                .unwrap()
                .len(),
            1
        );
        assert!(svc
            .list_reservations(Some("other@x.io"), None)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn event_id_is_attached() {
        let svc = service().await;
        let r = svc.create_reservation(request(Utc::now(), 1)).await.unwrap();
        let updated = svc.set_event_id(r.id, "  evt-42 ").await.unwrap();
        assert_eq!(updated.event_id.as_deref(), Some("evt-42"));

        assert!(matches!(
            svc.set_event_id(r.id, " ").await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.set_event_id(999, "evt").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn status_completed_while_waiting_is_not_overwritten() {
        let guards = Arc::new(VehicleGuards::new(StdDuration::from_secs(2)));
        let svc = Arc::new(service_with(guards.clone()).await);
        let r = svc.create_reservation(request(Utc::now(), 1)).await.unwrap();

        // Stand in for a lock transition holding the car.
        let held = guards.acquire("CAR001").await.unwrap();
        let pending = {
            let svc = svc.clone();
            tokio::spawn(async move {
                svc.update_status(r.id, ReservationStatus::Cancelled).await
            })
        };
        tokio::time::sleep(StdDuration::from_millis(20)).await;
        svc.repos
            .reservations()
            .set_status(r.id, ReservationStatus::Completed)
            .await
            .unwrap();
        drop(held);

        let err = pending.await.unwrap().unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(
            svc.get_reservation(r.id).await.unwrap().status,
            ReservationStatus::Completed
        );
    }
}
