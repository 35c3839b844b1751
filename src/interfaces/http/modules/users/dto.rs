//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::User;

/// User API representation. The password hash never leaves the service.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
        }
    }
}

/// Register user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "first_name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "last_name is required"))]
    pub last_name: String,
    #[validate(length(min = 6, max = 128, message = "password must be 6–128 characters"))]
    pub password: String,
}

/// Credential check request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AuthenticateRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}
