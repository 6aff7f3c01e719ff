use bcrypt::{hash, verify, BcryptError};

/// Hash a password using bcrypt
///
/// # Example
/// ```
/// use qrmenu_utils::hash::bcrypt_hash;
///
/// let hashed = bcrypt_hash("my_password").unwrap();
/// assert!(hashed.starts_with("$2"));
/// ```
pub fn bcrypt_hash(password: &str) -> Result<String, BcryptError> {
    hash(password.as_bytes(), 8)
}

/// Compare a plaintext password against a bcrypt hash.
///
/// A malformed hash never matches.
pub fn bcrypt_check(password: &str, hash: &str) -> bool {
    verify(password.as_bytes(), hash).unwrap_or(false)
}
