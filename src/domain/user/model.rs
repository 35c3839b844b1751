//! User domain entity

/// Registered customer, identified by email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// bcrypt hash, never exposed over the API
    pub password_hash: String,
}
