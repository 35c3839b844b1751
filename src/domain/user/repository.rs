use async_trait::async_trait;

use super::User;
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; an existing email is a `Conflict`
    async fn create(&self, user: User) -> DomainResult<()>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    /// Every user, ordered by email
    async fn find_all(&self) -> DomainResult<Vec<User>>;
}
