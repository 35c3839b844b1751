//! User HTTP handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::*;
use crate::application::{NewUser, UserService};
use crate::interfaces::http::common::{ApiError, ApiResponse, ApiResult, ValidatedJson};

#[derive(Clone)]
pub struct UserState {
    pub users: Arc<UserService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", body = ApiResponse<UserDto>),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn register_user(
    State(state): State<UserState>,
    ValidatedJson(request): ValidatedJson<RegisterUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    let user = state
        .users
        .register(NewUser {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            password: request.password,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::from(user))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users, ordered by email", body = ApiResponse<Vec<UserDto>>)
    )
)]
pub async fn list_users(State(state): State<UserState>) -> ApiResult<Vec<UserDto>> {
    let users = state.users.list().await?;
    Ok(Json(ApiResponse::success(
        users.into_iter().map(UserDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<UserState>,
    Path(email): Path<String>,
) -> ApiResult<UserDto> {
    let user = state.users.get(&email).await?;
    Ok(Json(ApiResponse::success(UserDto::from(user))))
}

#[utoipa::path(
    post,
    path = "/api/v1/users/authenticate",
    tag = "Users",
    request_body = AuthenticateRequest,
    responses(
        (status = 200, description = "Credentials valid", body = ApiResponse<UserDto>),
        (status = 401, description = "Unknown email or wrong password")
    )
)]
pub async fn authenticate(
    State(state): State<UserState>,
    ValidatedJson(request): ValidatedJson<AuthenticateRequest>,
) -> ApiResult<UserDto> {
    let user = state
        .users
        .authenticate(&request.email, &request.password)
        .await?;
    Ok(Json(ApiResponse::success(UserDto::from(user))))
}
