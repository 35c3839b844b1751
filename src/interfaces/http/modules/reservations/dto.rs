//! Reservation DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Reservation;

/// Reservation API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReservationDto {
    pub id: i32,
    /// Holder email
    pub user_id: String,
    pub vehicle_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// `active`, `completed` or `cancelled`
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            vehicle_id: r.vehicle_id,
            start: r.start,
            end: r.end,
            status: r.status.as_str().to_string(),
            event_id: r.event_id,
            created_at: r.created_at,
        }
    }
}

/// Create reservation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    #[validate(email(message = "user_id must be an email address"))]
    pub user_id: String,
    #[validate(length(min = 1, max = 64, message = "vehicle_id is required"))]
    pub vehicle_id: String,
    /// RFC 3339 or `YYYY-MM-DD HH:MM:SS` (UTC)
    pub start: String,
    pub end: String,
    /// External calendar event id
    pub event_id: Option<String>,
}

/// List reservations query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListReservationsParams {
    /// Filter by holder email
    pub user_id: Option<String>,
    /// Filter by status (active, completed, cancelled)
    pub status: Option<String>,
}

/// Status change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStatusRequest {
    /// `active`, `completed` or `cancelled`
    pub status: String,
}

/// Event id request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetEventIdRequest {
    #[validate(length(min = 1, max = 256, message = "event_id must be 1–256 characters"))]
    pub event_id: String,
}
