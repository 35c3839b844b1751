use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("{field} {value} outside valid bounds [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Vehicle {0} is busy, retry the request")]
    Busy(String),

    #[error("Data integrity violation: {0}")]
    Integrity(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field,
            value: value.to_string(),
        }
    }

    /// Whether the whole operation may succeed if the caller retries it
    /// (lost a race for the vehicle or a concurrent writer won).
    pub fn is_retriable(&self) -> bool {
        matches!(self, DomainError::Busy(_) | DomainError::Conflict(_))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_names_the_bound() {
        let err = DomainError::OutOfRange {
            field: "lat",
            value: 95.0,
            min: -90.0,
            max: 90.0,
        };
        assert_eq!(err.to_string(), "lat 95 outside valid bounds [-90, 90]");
    }

    #[test]
    fn only_races_are_retriable() {
        assert!(DomainError::Busy("CAR001".into()).is_retriable());
        assert!(DomainError::Conflict("lost update".into()).is_retriable());
        assert!(!DomainError::Integrity("two bookings".into()).is_retriable());
        assert!(!DomainError::not_found("Vehicle", "id", "X").is_retriable());
    }
}
