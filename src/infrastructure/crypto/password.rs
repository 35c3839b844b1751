//! Password hashing for user accounts

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

#[cfg(not(test))]
const COST: u32 = DEFAULT_COST;
// Minimum cost keeps the test suite fast.
#[cfg(test)]
const COST: u32 = 4;

/// Hash a plaintext password with bcrypt.
pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    debug_assert!(COST <= DEFAULT_COST);
    hash(password, COST)
}

/// Check a plaintext password against a stored bcrypt hash.
///
/// A malformed stored hash is an error, not a mismatch.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, BcryptError> {
    verify(password, stored_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hashed = hash_password("hunter2").unwrap();
        assert!(hashed.starts_with("$2"));
        assert!(verify_password("hunter2", &hashed).unwrap());
        assert!(!verify_password("hunter3", &hashed).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("hunter2", "not-a-hash").is_err());
    }
}
