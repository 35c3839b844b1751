//! Vehicle DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::{LockReceipt, VehicleDetails};
use crate::domain::{Vehicle, VehicleModel};

/// Make/model record
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VehicleModelDto {
    pub id: i32,
    pub make: String,
    pub model: String,
    pub year: i32,
    /// Seats
    pub capacity: i32,
    pub colour: String,
}

impl From<VehicleModel> for VehicleModelDto {
    fn from(m: VehicleModel) -> Self {
        Self {
            id: m.id,
            make: m.make,
            model: m.model,
            year: m.year,
            capacity: m.capacity,
            colour: m.colour,
        }
    }
}

/// Vehicle API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VehicleDto {
    pub id: String,
    pub name: String,
    pub model_id: i32,
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_per_hour: Option<f64>,
    /// `null` until the car first reports its position
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<VehicleModelDto>,
}

impl From<Vehicle> for VehicleDto {
    fn from(v: Vehicle) -> Self {
        Self {
            latitude: v.position.map(|p| p.latitude()),
            longitude: v.position.map(|p| p.longitude()),
            id: v.id,
            name: v.name,
            model_id: v.model_id,
            locked: v.locked,
            cost_per_hour: v.cost_per_hour,
            model: None,
        }
    }
}

impl From<VehicleDetails> for VehicleDto {
    fn from(d: VehicleDetails) -> Self {
        let mut dto = Self::from(d.vehicle);
        dto.model = d.model.map(VehicleModelDto::from);
        dto
    }
}

/// Create vehicle model request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVehicleModelRequest {
    #[validate(length(min = 1, max = 64, message = "make must be 1–64 characters"))]
    pub make: String,
    #[validate(length(min = 1, max = 64, message = "model must be 1–64 characters"))]
    pub model: String,
    #[validate(range(min = 1886, max = 2100, message = "year must be between 1886 and 2100"))]
    pub year: i32,
    #[validate(range(min = 1, max = 100, message = "capacity must be 1–100"))]
    pub capacity: i32,
    #[validate(length(max = 32, message = "colour must be at most 32 characters"))]
    #[serde(default)]
    pub colour: String,
}

/// Register vehicle request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterVehicleRequest {
    #[validate(length(min = 1, max = 64, message = "id must be 1–64 characters"))]
    pub id: String,
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    pub model_id: i32,
    #[validate(range(min = 0.0, message = "cost_per_hour must be non-negative"))]
    pub cost_per_hour: Option<f64>,
    /// Initial position; give both coordinates or neither
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Availability window query
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityParams {
    /// Window start (RFC 3339 or `YYYY-MM-DD HH:MM:SS`, UTC)
    pub start: String,
    /// Window end
    pub end: String,
}

/// Lock / unlock request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LockRequest {
    /// Email of the reservation holder
    #[validate(email(message = "user_id must be an email address"))]
    pub user_id: String,
    /// `true` to lock (return the car), `false` to unlock
    pub locked: bool,
}

/// Applied lock transition
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LockReceiptDto {
    pub vehicle_id: String,
    pub locked: bool,
    /// Reservation completed by this transition, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_reservation: Option<i32>,
    pub message: String,
}

impl From<LockReceipt> for LockReceiptDto {
    fn from(r: LockReceipt) -> Self {
        Self {
            vehicle_id: r.vehicle_id,
            locked: r.locked,
            completed_reservation: r.completed_reservation,
            message: r.message,
        }
    }
}

/// Position report. Bounds are checked by the engine.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PositionRequest {
    pub latitude: f64,
    pub longitude: f64,
}
