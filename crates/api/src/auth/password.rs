//! bcrypt password hashing and verification.
//!
//! Hashes embed their salt and work factor, so verification needs no extra
//! parameters. Comparison inside `bcrypt::verify` is constant-time.

use bcrypt::BcryptError;

/// Default bcrypt work factor.
pub const DEFAULT_WORK_FACTOR: u32 = 12;

/// Why hashing or verification failed.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password must not be empty")]
    EmptyPassword,
    /// Malformed stored hash or an invalid work factor. A mismatched
    /// password is NOT an error; `verify_password` returns `Ok(false)`.
    #[error(transparent)]
    Bcrypt(#[from] BcryptError),
}

/// Hash a plaintext password with the default work factor.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    hash_password_with_cost(password, DEFAULT_WORK_FACTOR)
}

/// Hash a plaintext password with an explicit work factor.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::EmptyPassword);
    }
    Ok(bcrypt::hash(password, cost)?)
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not,
/// and an error only when the stored hash itself is malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    Ok(bcrypt::verify(password, hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost; keeps the tests fast while exercising the same
    // code path as the production work factor.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_and_verify() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password_with_cost(password, TEST_COST).expect("hashing should succeed");

        assert_ne!(hash, password, "stored value must never be the plaintext");
        assert!(hash.starts_with("$2"), "expected a bcrypt hash prefix");

        let verified = verify_password(password, &hash).expect("verify should succeed");
        assert!(verified, "correct password should verify as true");
    }

    #[test]
    fn test_wrong_password_is_false_not_error() {
        let hash = hash_password_with_cost("real-password", TEST_COST).expect("hashing");
        let verified = verify_password("wrong-password", &hash).expect("verify should succeed");
        assert!(!verified, "wrong password should verify as false");
    }

    #[test]
    fn test_empty_password_is_rejected() {
        let result = hash_password_with_cost("", TEST_COST);
        assert!(matches!(result, Err(PasswordError::EmptyPassword)));
    }

    #[test]
    fn test_malformed_stored_hash_is_an_error() {
        let result = verify_password("whatever", "not-a-bcrypt-hash");
        assert!(matches!(result, Err(PasswordError::Bcrypt(_))));
    }

    #[test]
    fn test_same_password_hashes_differently() {
        // Random salts: two hashes of the same input must differ.
        let a = hash_password_with_cost("passWord123!", TEST_COST).expect("hashing");
        let b = hash_password_with_cost("passWord123!", TEST_COST).expect("hashing");
        assert_ne!(a, b);
        assert!(verify_password("passWord123!", &a).unwrap());
        assert!(verify_password("passWord123!", &b).unwrap());
    }
}
