//! Reservation HTTP handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::*;
use crate::application::BookingService;
use crate::domain::{NewReservation, ReservationStatus, TimeWindow};
use crate::interfaces::http::common::{ApiError, ApiResponse, ApiResult, ValidatedJson};
use crate::shared::parse_timestamp;

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationState {
    pub booking: Arc<BookingService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Invalid window"),
        (status = 404, description = "Unknown user or vehicle"),
        (status = 409, description = "Vehicle already booked for an overlapping window")
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationState>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReservationDto>>), ApiError> {
    let window = TimeWindow::new(
        parse_timestamp(&request.start)?,
        parse_timestamp(&request.end)?,
    )?;

    let reservation = state
        .booking
        .create_reservation(NewReservation {
            user_id: request.user_id,
            vehicle_id: request.vehicle_id,
            window,
            event_id: request.event_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ReservationDto::from(reservation))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    params(ListReservationsParams),
    responses(
        (status = 200, description = "Reservations, ordered by id", body = ApiResponse<Vec<ReservationDto>>),
        (status = 400, description = "Unknown status")
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationState>,
    Query(params): Query<ListReservationsParams>,
) -> ApiResult<Vec<ReservationDto>> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<ReservationStatus>)
        .transpose()?;

    let reservations = state
        .booking
        .list_reservations(params.user_id.as_deref(), status)
        .await?;

    Ok(Json(ApiResponse::success(
        reservations.into_iter().map(ReservationDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationState>,
    Path(id): Path<i32>,
) -> ApiResult<ReservationDto> {
    let reservation = state.booking.get_reservation(id).await?;
    Ok(Json(ApiResponse::success(ReservationDto::from(reservation))))
}

#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}/status",
    tag = "Reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Re-activation would overlap another booking")
    )
)]
pub async fn update_reservation_status(
    State(state): State<ReservationState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateStatusRequest>,
) -> ApiResult<ReservationDto> {
    let status: ReservationStatus = request.status.parse()?;
    let reservation = state.booking.update_status(id, status).await?;
    Ok(Json(ApiResponse::success(ReservationDto::from(reservation))))
}

#[utoipa::path(
    put,
    path = "/api/v1/reservations/{id}/event",
    tag = "Reservations",
    params(("id" = i32, Path, description = "Reservation ID")),
    request_body = SetEventIdRequest,
    responses(
        (status = 200, description = "Event id stored", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn set_reservation_event(
    State(state): State<ReservationState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<SetEventIdRequest>,
) -> ApiResult<ReservationDto> {
    let reservation = state.booking.set_event_id(id, &request.event_id).await?;
    Ok(Json(ApiResponse::success(ReservationDto::from(reservation))))
}
