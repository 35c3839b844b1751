//! Vehicle and vehicle model entities

use crate::shared::{DomainError, DomainResult};

pub const LATITUDE_BOUNDS: (f64, f64) = (-90.0, 90.0);
pub const LONGITUDE_BOUNDS: (f64, f64) = (-180.0, 180.0);

/// Reported vehicle position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    latitude: f64,
    longitude: f64,
}

impl Position {
    /// Longitude is checked before latitude; non-finite values are out of range.
    pub fn new(latitude: f64, longitude: f64) -> DomainResult<Self> {
        check_bounds("long", longitude, LONGITUDE_BOUNDS)?;
        check_bounds("lat", latitude, LATITUDE_BOUNDS)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

fn check_bounds(field: &'static str, value: f64, (min, max): (f64, f64)) -> DomainResult<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(DomainError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Shared car
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    pub model_id: i32,
    /// `true` while the car is locked
    pub locked: bool,
    /// Cost per hour
    pub cost_per_hour: Option<f64>,
    /// `None` until the first position report
    pub position: Option<Position>,
}

impl Vehicle {
    /// New cars are registered locked and without a position.
    pub fn new(id: impl Into<String>, name: impl Into<String>, model_id: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            model_id,
            locked: true,
            cost_per_hour: None,
            position: None,
        }
    }

    pub fn lock_state_str(&self) -> &'static str {
        if self.locked {
            "locked"
        } else {
            "unlocked"
        }
    }
}

/// Make/model description shared by several cars
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleModel {
    pub id: i32,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub capacity: i32,
    pub colour: String,
}

#[derive(Debug, Clone)]
pub struct NewVehicleModel {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub capacity: i32,
    pub colour: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds_inclusive() {
        assert!(Position::new(90.0, 180.0).is_ok());
        assert!(Position::new(-90.0, -180.0).is_ok());
        let p = Position::new(-37.81, 144.96).unwrap();
        assert_eq!(p.latitude(), -37.81);
        assert_eq!(p.longitude(), 144.96);
    }

    #[test]
    fn rejects_latitude_out_of_range() {
        match Position::new(95.0, 0.0) {
            Err(DomainError::OutOfRange { field, value, .. }) => {
                assert_eq!(field, "lat");
                assert_eq!(value, 95.0);
            }
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn longitude_is_reported_first() {
        match Position::new(95.0, 200.0) {
            Err(DomainError::OutOfRange { field, .. }) => assert_eq!(field, "long"),
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn nan_is_out_of_range() {
        assert!(Position::new(f64::NAN, 0.0).is_err());
        assert!(Position::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn new_vehicle_starts_locked_without_position() {
        let v = Vehicle::new("CAR001", "Corolla 1", 1);
        assert!(v.locked);
        assert_eq!(v.lock_state_str(), "locked");
        assert!(v.position.is_none());
    }
}
