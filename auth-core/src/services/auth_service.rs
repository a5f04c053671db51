/// Auth flows
///
/// Compositions of the credential verifier, token issuer, revocation
/// registry, and access gate: registration, login, refresh, logout, and
/// principal lookup/removal. Every dependency is injected at construction;
/// nothing here owns hidden global state.
use std::sync::Arc;

use token_core::{Clock, TokenIssuer, TokenVerifier};
use uuid::Uuid;
use validator::Validate;

use crate::config::JwtSettings;
use crate::error::{AuthError, Result};
use crate::gate::{AccessGate, Guard, TokenRequirements};
use crate::models::{LoginRequest, Principal, RegisterRequest, TokenPair};
use crate::security::{password, RevocationRegistry};
use crate::services::CredentialVerifier;
use crate::store::{NewPrincipal, PrincipalStore};
use crate::validators;

pub struct AuthService {
    store: Arc<dyn PrincipalStore>,
    credentials: CredentialVerifier,
    issuer: TokenIssuer,
    gate: Arc<AccessGate>,
    registry: Arc<RevocationRegistry>,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn PrincipalStore>,
        issuer: TokenIssuer,
        gate: Arc<AccessGate>,
        registry: Arc<RevocationRegistry>,
    ) -> Self {
        Self {
            credentials: CredentialVerifier::new(store.clone()),
            store,
            issuer,
            gate,
            registry,
        }
    }

    /// Wire up a service from settings: one registry, one issuer, one gate,
    /// all sharing the injected clock.
    pub fn from_settings(
        store: Arc<dyn PrincipalStore>,
        jwt: &JwtSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let registry = Arc::new(RevocationRegistry::new());
        let issuer = TokenIssuer::new(
            jwt.secret.as_bytes(),
            jwt.access_ttl_secs,
            jwt.refresh_ttl_secs,
            clock.clone(),
        );
        let gate = Arc::new(AccessGate::new(
            TokenVerifier::new(jwt.secret.as_bytes()),
            registry.clone(),
            clock,
        ));

        Self::new(store, issuer, gate, registry)
    }

    /// The gate shared by every request path, for building [`Guard`]s.
    pub fn gate(&self) -> Arc<AccessGate> {
        self.gate.clone()
    }

    pub fn registry(&self) -> Arc<RevocationRegistry> {
        self.registry.clone()
    }

    /// Register a new principal.
    ///
    /// Duplicate username or email is a conflict and leaves the store
    /// unmutated. New principals are never administrators.
    pub async fn register(&self, req: RegisterRequest) -> Result<Principal> {
        req.validate()?;
        if !validators::validate_username(&req.username) {
            return Err(AuthError::Validation(
                "username may only contain letters, digits, '-' and '_'".to_string(),
            ));
        }
        if !validators::validate_email(&req.email) {
            return Err(AuthError::Validation("invalid email address".to_string()));
        }

        let password_hash = password::hash_password(&req.password)?;

        let principal = self
            .store
            .create(NewPrincipal {
                username: req.username,
                email: req.email,
                password_hash,
                admin: false,
            })
            .await?;

        tracing::info!(principal_id = %principal.id, "principal registered");
        Ok(principal)
    }

    /// Verify primary credentials and mint a token pair.
    ///
    /// The access token is fresh: it alone satisfies freshness-gated
    /// operations until it expires or is replaced through refresh.
    pub async fn login(&self, req: &LoginRequest) -> Result<TokenPair> {
        let principal = self
            .credentials
            .verify(&req.identifier, &req.password)
            .await?;

        let access = self
            .issuer
            .issue_access_token(principal.id, principal.admin, true)?;
        let refresh = self.issuer.issue_refresh_token(principal.id, principal.admin)?;

        tracing::info!(principal_id = %principal.id, "login succeeded");

        Ok(TokenPair {
            access_token: access.token,
            refresh_token: refresh.token,
            token_type: "Bearer".to_string(),
            expires_in: self.issuer.access_ttl().num_seconds(),
        })
    }

    /// Exchange a refresh token for a new token pair.
    ///
    /// Refresh tokens are single-use: the presented token's jti is revoked
    /// before the replacement pair is minted, so a replayed refresh token
    /// is rejected as revoked. The new access token is not fresh.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let admitted = self
            .gate
            .authorize(Some(refresh_token), &TokenRequirements::refresh())?;

        // Revoke first; if issuance fails the presented token stays dead
        // rather than reusable.
        self.registry.revoke(admitted.token_id, admitted.expires_at);

        let access = self
            .issuer
            .issue_access_token(admitted.principal_id, admitted.admin, false)?;
        let refresh = self
            .issuer
            .issue_refresh_token(admitted.principal_id, admitted.admin)?;

        tracing::info!(principal_id = %admitted.principal_id, "token pair rotated");

        Ok(TokenPair {
            access_token: access.token,
            refresh_token: refresh.token,
            token_type: "Bearer".to_string(),
            expires_in: self.issuer.access_ttl().num_seconds(),
        })
    }

    /// Revoke the presented token, whichever kind it is.
    pub async fn logout(&self, token: &str) -> Result<()> {
        let admitted = self.gate.authorize(Some(token), &TokenRequirements::any())?;

        self.registry.revoke(admitted.token_id, admitted.expires_at);

        tracing::info!(principal_id = %admitted.principal_id, "logged out");
        Ok(())
    }

    pub async fn get_principal(&self, id: Uuid) -> Result<Principal> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(AuthError::PrincipalNotFound)
    }

    /// Remove a principal. Destructive, so the caller must present a fresh
    /// access token belonging to an administrator.
    ///
    /// Outstanding tokens for the removed principal are orphaned: they stay
    /// structurally valid until expiry or revocation, but resolving the
    /// identity behind them yields not-found.
    pub async fn delete_principal(&self, token: Option<&str>, id: Uuid) -> Result<()> {
        let guard = Guard::new(self.gate.clone(), TokenRequirements::fresh_access()).admin_only();
        let admitted = guard.admit(token)?;

        self.store.delete(id).await?;

        tracing::warn!(
            principal_id = %id,
            deleted_by = %admitted.principal_id,
            "principal removed"
        );
        Ok(())
    }
}
