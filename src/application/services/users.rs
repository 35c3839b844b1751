//! User registration and credential checks

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, RepositoryProvider, User};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn register(&self, new: NewUser) -> DomainResult<User> {
        let email = new.email.trim().to_string();
        if self.repos.users().find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "User {} already registered",
                email
            )));
        }

        let password_hash = hash_password(&new.password)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))?;

        let user = User {
            email,
            first_name: new.first_name,
            last_name: new.last_name,
            password_hash,
        };
        self.repos.users().create(user.clone()).await?;
        info!("User registered: {}", user.email);
        Ok(user)
    }

    pub async fn get(&self, email: &str) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "email", email))
    }

    pub async fn list(&self) -> DomainResult<Vec<User>> {
        self.repos.users().find_all().await
    }

    /// Check credentials. Unknown email and wrong password are both
    /// `Unauthorized`, told apart only by the message.
    pub async fn authenticate(&self, email: &str, password: &str) -> DomainResult<User> {
        let user = self
            .repos
            .users()
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::Unauthorized("EMAIL".to_string()))?;

        let valid = verify_password(password, &user.password_hash)
            .map_err(|e| DomainError::Internal(format!("Failed to verify password: {}", e)))?;

        if !valid {
            return Err(DomainError::Unauthorized("PASSWORD".to_string()));
        }
        Ok(user)
    }
}
