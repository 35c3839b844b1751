//! Vehicle HTTP handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::dto::*;
use crate::application::{
    CatalogueService, FleetService, LockChangeOutcome, NewVehicle, VehicleCommand,
    VehicleCommandResult,
};
use crate::domain::{DomainError, NewVehicleModel, TimeWindow};
use crate::interfaces::http::common::{ApiError, ApiResponse, ApiResult, ValidatedJson};
use crate::shared::parse_timestamp;

/// Vehicle handler state
#[derive(Clone)]
pub struct VehicleState {
    pub fleet: Arc<FleetService>,
    pub catalogue: Arc<CatalogueService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    responses(
        (status = 200, description = "All vehicles, ordered by id", body = ApiResponse<Vec<VehicleDto>>)
    )
)]
pub async fn list_vehicles(State(state): State<VehicleState>) -> ApiResult<Vec<VehicleDto>> {
    let vehicles = state.catalogue.list_vehicles().await?;
    Ok(Json(ApiResponse::success(
        vehicles.into_iter().map(VehicleDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    request_body = RegisterVehicleRequest,
    responses(
        (status = 201, description = "Vehicle registered (locked)", body = ApiResponse<VehicleDto>),
        (status = 400, description = "Invalid position"),
        (status = 404, description = "Unknown vehicle model"),
        (status = 409, description = "Vehicle id already used")
    )
)]
pub async fn register_vehicle(
    State(state): State<VehicleState>,
    ValidatedJson(request): ValidatedJson<RegisterVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleDto>>), ApiError> {
    let position = match (request.latitude, request.longitude) {
        (Some(lat), Some(long)) => Some((lat, long)),
        (None, None) => None,
        _ => {
            return Err(ApiError::bad_request(
                "latitude and longitude must be given together",
            ))
        }
    };

    let details = state
        .catalogue
        .register_vehicle(NewVehicle {
            id: request.id,
            name: request.name,
            model_id: request.model_id,
            cost_per_hour: request.cost_per_hour,
            position,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(VehicleDto::from(details))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/available",
    tag = "Vehicles",
    params(AvailabilityParams),
    responses(
        (status = 200, description = "Vehicles free for the whole window", body = ApiResponse<Vec<VehicleDto>>),
        (status = 400, description = "Malformed or reversed window")
    )
)]
pub async fn available_vehicles(
    State(state): State<VehicleState>,
    Query(params): Query<AvailabilityParams>,
) -> ApiResult<Vec<VehicleDto>> {
    let window = TimeWindow::new(parse_timestamp(&params.start)?, parse_timestamp(&params.end)?)?;
    let free = state.fleet.find_available(&window).await?;
    let described = state.catalogue.describe(free).await?;
    Ok(Json(ApiResponse::success(
        described.into_iter().map(VehicleDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    params(("id" = String, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle details", body = ApiResponse<VehicleDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_vehicle(
    State(state): State<VehicleState>,
    Path(id): Path<String>,
) -> ApiResult<VehicleDto> {
    let details = state.catalogue.get_vehicle(&id).await?;
    Ok(Json(ApiResponse::success(VehicleDto::from(details))))
}

#[utoipa::path(
    put,
    path = "/api/v1/vehicles/{id}/lock",
    tag = "Vehicles",
    params(("id" = String, Path, description = "Vehicle ID")),
    request_body = LockRequest,
    responses(
        (status = 200, description = "Lock state changed", body = ApiResponse<LockReceiptDto>),
        (status = 404, description = "Unknown vehicle, or no valid booking for this user"),
        (status = 409, description = "Concurrent change, retry"),
        (status = 500, description = "Several bookings qualify; data needs repair")
    )
)]
pub async fn change_lock(
    State(state): State<VehicleState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<LockRequest>,
) -> ApiResult<LockReceiptDto> {
    let command = VehicleCommand::ChangeLock {
        user_id: request.user_id,
        locked: request.locked,
    };

    match state.fleet.dispatch(&id, command).await? {
        VehicleCommandResult::Lock(LockChangeOutcome::Applied(receipt)) => {
            info!("{} ({})", receipt.message, receipt.vehicle_id);
            Ok(Json(ApiResponse::success(LockReceiptDto::from(receipt))))
        }
        VehicleCommandResult::Lock(LockChangeOutcome::NoneFound) => {
            Err(ApiError::not_found("No valid bookings were found"))
        }
        VehicleCommandResult::Lock(LockChangeOutcome::MultipleFound(ids)) => {
            Err(DomainError::Integrity(format!(
                "Multiple valid bookings were found for vehicle {}: {:?}",
                id, ids
            ))
            .into())
        }
        VehicleCommandResult::Position(_) => Err(DomainError::Internal(
            "lock command produced a position result".into(),
        )
        .into()),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/vehicles/{id}/position",
    tag = "Vehicles",
    params(("id" = String, Path, description = "Vehicle ID")),
    request_body = PositionRequest,
    responses(
        (status = 200, description = "Position stored", body = ApiResponse<VehicleDto>),
        (status = 400, description = "Coordinate outside valid bounds"),
        (status = 404, description = "Not found")
    )
)]
pub async fn report_position(
    State(state): State<VehicleState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<PositionRequest>,
) -> ApiResult<VehicleDto> {
    let command = VehicleCommand::ReportPosition {
        latitude: request.latitude,
        longitude: request.longitude,
    };

    match state.fleet.dispatch(&id, command).await? {
        VehicleCommandResult::Position(vehicle) => {
            Ok(Json(ApiResponse::success(VehicleDto::from(vehicle))))
        }
        VehicleCommandResult::Lock(_) => Err(DomainError::Internal(
            "position command produced a lock result".into(),
        )
        .into()),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicle-models",
    tag = "Vehicle Models",
    responses(
        (status = 200, description = "All vehicle models", body = ApiResponse<Vec<VehicleModelDto>>)
    )
)]
pub async fn list_vehicle_models(
    State(state): State<VehicleState>,
) -> ApiResult<Vec<VehicleModelDto>> {
    let models = state.catalogue.list_models().await?;
    Ok(Json(ApiResponse::success(
        models.into_iter().map(VehicleModelDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/vehicle-models",
    tag = "Vehicle Models",
    request_body = CreateVehicleModelRequest,
    responses(
        (status = 201, description = "Vehicle model created", body = ApiResponse<VehicleModelDto>),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_vehicle_model(
    State(state): State<VehicleState>,
    ValidatedJson(request): ValidatedJson<CreateVehicleModelRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleModelDto>>), ApiError> {
    let model = state
        .catalogue
        .create_model(NewVehicleModel {
            make: request.make,
            model: request.model,
            year: request.year,
            capacity: request.capacity,
            colour: request.colour,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(VehicleModelDto::from(model))),
    ))
}
