//! Lock transition types

use crate::domain::reservation::Reservation;

/// Outcome of validating a requested lock change against outstanding
/// reservations.
#[derive(Debug, Clone, PartialEq)]
pub enum LockAuthorization {
    /// Exactly one active, started reservation permits the change
    Authorized(Reservation),
    /// No reservation permits the change
    NoneFound,
    /// More than one reservation qualifies; the single-holder invariant
    /// was broken upstream
    MultipleFound(Vec<i32>),
}

/// Mutation applied atomically by a [`TransitionRepository`](super::TransitionRepository).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockTransition {
    pub vehicle_id: String,
    /// Lock state to apply. The vehicle must currently hold the opposite.
    pub locked: bool,
    /// Active reservation to mark completed in the same unit of work
    pub completes: Option<i32>,
}

impl LockTransition {
    /// Build the transition authorized by `reservation`: locking returns the
    /// car and completes the booking, unlocking leaves it active.
    pub fn authorized_by(reservation: &Reservation, locked: bool) -> Self {
        Self {
            vehicle_id: reservation.vehicle_id.clone(),
            locked,
            completes: locked.then_some(reservation.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reservation::ReservationStatus;
    use chrono::Utc;

    fn reservation() -> Reservation {
        Reservation {
            id: 7,
            user_id: "u@example.com".into(),
            vehicle_id: "CAR001".into(),
            start: Utc::now(),
            end: Utc::now(),
            status: ReservationStatus::Active,
            event_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn locking_completes_the_reservation() {
        let t = LockTransition::authorized_by(&reservation(), true);
        assert_eq!(t.completes, Some(7));
        assert_eq!(t.vehicle_id, "CAR001");
    }

    #[test]
    fn unlocking_leaves_the_reservation_active() {
        let t = LockTransition::authorized_by(&reservation(), false);
        assert_eq!(t.completes, None);
        assert!(!t.locked);
    }
}
