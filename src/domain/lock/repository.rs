//! Lock transition unit of work

use async_trait::async_trait;

use super::model::LockTransition;
use crate::domain::DomainResult;

#[async_trait]
pub trait TransitionRepository: Send + Sync {
    /// Set the vehicle lock state and, if requested, complete the reservation
    /// as one atomic unit.
    ///
    /// Fails with `Conflict` and changes nothing when the vehicle no longer
    /// holds the opposite lock state or the reservation is no longer active.
    async fn apply(&self, transition: &LockTransition) -> DomainResult<()>;
}
