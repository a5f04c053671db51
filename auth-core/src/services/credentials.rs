/// Credential verification
///
/// Looks up exactly one principal by username or email and verifies the
/// presented secret against the stored Argon2id hash. Every failure mode
/// collapses into the same generic rejection so the response gives no
/// signal about which identifiers exist.
use std::sync::Arc;

use crate::error::{AuthError, Result};
use crate::models::Principal;
use crate::security::password;
use crate::store::PrincipalStore;

pub struct CredentialVerifier {
    store: Arc<dyn PrincipalStore>,
}

impl CredentialVerifier {
    pub fn new(store: Arc<dyn PrincipalStore>) -> Self {
        Self { store }
    }

    /// Verify `(identifier, secret)` and return the matching principal.
    ///
    /// The missing-principal path still performs one Argon2 verification
    /// against a decoy hash, keeping it in the same timing class as the
    /// wrong-password path.
    pub async fn verify(&self, identifier: &str, secret: &str) -> Result<Principal> {
        let principal = match self.store.find_by_identifier(identifier).await? {
            Some(principal) => principal,
            None => {
                password::verify_against_decoy(secret);
                return Err(AuthError::InvalidCredentials);
            }
        };

        if password::verify_password(secret, &principal.password_hash)? {
            Ok(principal)
        } else {
            tracing::debug!(principal_id = %principal.id, "password mismatch");
            Err(AuthError::InvalidCredentials)
        }
    }
}
