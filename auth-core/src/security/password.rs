/// Password hashing and verification using Argon2id
use crate::error::{AuthError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;
use zxcvbn::zxcvbn;

/// Hash used to equalize the timing of lookups that found no principal.
///
/// Verifying a presented secret against this hash costs the same Argon2
/// work as a real verification, keeping the missing-identifier path in the
/// same timing class as the wrong-password path.
static DECOY_HASH: Lazy<String> = Lazy::new(|| {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(b"decoy-password-never-matches", &salt)
        .map(|hash| hash.to_string())
        .unwrap_or_default()
});

/// Hash a password using the Argon2id algorithm
///
/// ## Security
///
/// - Algorithm: Argon2id (default configuration)
/// - Salt: random 16-byte salt generated per password
/// - Password strength: composition rules plus zxcvbn score >= 3
///
/// ## Returns
///
/// PHC-formatted hash string safe for storage
pub fn hash_password(password: &str) -> Result<String> {
    // Validate password strength before spending hashing work
    validate_password_strength(password)?;

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against its stored hash
///
/// Uses the constant-time comparison inside `argon2`; never plaintext
/// equality.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AuthError::Internal(format!("Invalid password hash format: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Internal(format!(
            "Password verification failed: {}",
            e
        ))),
    }
}

/// Burn one Argon2 verification against the decoy hash.
///
/// Called on the no-such-principal path so both credential failure modes
/// take comparable time. The result is discarded.
pub(crate) fn verify_against_decoy(password: &str) {
    let _ = verify_password(password, &DECOY_HASH);
}

/// Validate password strength using composition rules and zxcvbn
///
/// ## Requirements
///
/// - Minimum 8 characters
/// - At least one uppercase letter
/// - At least one lowercase letter
/// - At least one digit
/// - At least one special character
/// - zxcvbn entropy score >= 3
fn validate_password_strength(password: &str) -> Result<()> {
    if password.len() < 8 {
        return Err(AuthError::WeakPassword(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| !c.is_alphanumeric());

    if !has_uppercase {
        return Err(AuthError::WeakPassword(
            "Password must contain at least one uppercase letter".to_string(),
        ));
    }

    if !has_lowercase {
        return Err(AuthError::WeakPassword(
            "Password must contain at least one lowercase letter".to_string(),
        ));
    }

    if !has_digit {
        return Err(AuthError::WeakPassword(
            "Password must contain at least one digit".to_string(),
        ));
    }

    if !has_special {
        return Err(AuthError::WeakPassword(
            "Password must contain at least one special character".to_string(),
        ));
    }

    let entropy = zxcvbn(password, &[])
        .map_err(|e| AuthError::Internal(format!("Password entropy calculation failed: {}", e)))?;

    if entropy.score() < 3 {
        return Err(AuthError::WeakPassword(
            "Password is too weak. Please use a stronger password with higher entropy.".to_string(),
        ));
    }

    Ok(())
}
