//! Reservation domain entity

use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::window::TimeWindow;
use crate::shared::DomainError;

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservationStatus {
    /// Booked and not yet returned
    Active,
    /// Vehicle returned (locked) by the holder
    Completed,
    /// Withdrawn before use
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(DomainError::Validation(format!(
                "Unknown reservation status '{}': expected active, completed or cancelled",
                other
            ))),
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A time-bounded booking of one vehicle by one user
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: i32,
    /// Holder (user email)
    pub user_id: String,
    pub vehicle_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: ReservationStatus,
    /// External calendar event correlated with this booking
    pub event_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn window(&self) -> TimeWindow {
        TimeWindow::stored(self.start, self.end)
    }

    /// Not yet completed or cancelled
    pub fn is_active(&self) -> bool {
        self.status == ReservationStatus::Active
    }

    /// Only the start is checked: an overdue reservation still counts.
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.start <= now
    }
}

/// Data for a reservation that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub user_id: String,
    pub vehicle_id: String,
    pub window: TimeWindow,
    pub event_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_reservation(start: DateTime<Utc>) -> Reservation {
        Reservation {
            id: 1,
            user_id: "donald@gmail.com".into(),
            vehicle_id: "CAR001".into(),
            start,
            end: start + Duration::hours(2),
            status: ReservationStatus::Active,
            event_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn status_parses_known_names_only() {
        for status in [
            ReservationStatus::Active,
            ReservationStatus::Completed,
            ReservationStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<ReservationStatus>().unwrap(), status);
        }
        assert!("2".parse::<ReservationStatus>().is_err());
        assert!("Completed".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn overdue_reservation_has_started() {
        let now = Utc::now();
        let r = sample_reservation(now - Duration::hours(5));
        assert!(r.end < now);
        assert!(r.has_started(now));
    }

    #[test]
    fn future_reservation_has_not_started() {
        let now = Utc::now();
        assert!(!sample_reservation(now + Duration::minutes(1)).has_started(now));
        assert!(sample_reservation(now).has_started(now));
    }

    #[test]
    fn only_active_status_is_active() {
        let mut r = sample_reservation(Utc::now());
        assert!(r.is_active());
        r.status = ReservationStatus::Cancelled;
        assert!(!r.is_active());
    }
}
