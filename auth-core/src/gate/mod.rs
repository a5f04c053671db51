/// Access gate
///
/// Per-request admission decision over a presented token. Terminal states
/// are admitted claims or a structured rejection whose reason code tells
/// the caller exactly which check failed.
pub mod guard;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use token_core::{Claims, Clock, TokenKind, TokenVerifier};
use uuid::Uuid;

use crate::error::{AuthError, Result};
use crate::security::RevocationRegistry;

pub use guard::Guard;

/// What a call site demands of a token before the operation may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenRequirements {
    /// Required kind; `None` admits either kind (logout accepts both).
    pub kind: Option<TokenKind>,
    /// Demand a token minted directly from a password login.
    pub require_fresh: bool,
}

impl TokenRequirements {
    /// Ordinary authenticated operation.
    pub fn access() -> Self {
        Self {
            kind: Some(TokenKind::Access),
            require_fresh: false,
        }
    }

    /// Sensitive operation; a token obtained through refresh is not enough.
    pub fn fresh_access() -> Self {
        Self {
            kind: Some(TokenKind::Access),
            require_fresh: true,
        }
    }

    /// Refresh endpoint: only refresh tokens are admitted.
    pub fn refresh() -> Self {
        Self {
            kind: Some(TokenKind::Refresh),
            require_fresh: false,
        }
    }

    /// Either kind; used by logout so any live token can end its own life.
    pub fn any() -> Self {
        Self {
            kind: None,
            require_fresh: false,
        }
    }
}

/// Validated identity exposed to the operation behind the gate.
#[derive(Debug, Clone)]
pub struct Admitted {
    pub principal_id: Uuid,
    pub token_id: Uuid,
    pub kind: TokenKind,
    pub fresh: bool,
    pub admin: bool,
    pub expires_at: DateTime<Utc>,
}

/// Decides admission for every authenticated call path.
///
/// Signature verification runs before any embedded claim is trusted. The
/// remaining checks are ordered for diagnostic precision, not security:
/// all of them must pass.
pub struct AccessGate {
    verifier: TokenVerifier,
    registry: Arc<RevocationRegistry>,
    clock: Arc<dyn Clock>,
}

impl AccessGate {
    pub fn new(
        verifier: TokenVerifier,
        registry: Arc<RevocationRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            verifier,
            registry,
            clock,
        }
    }

    /// Evaluate a presented token against the requirements.
    ///
    /// State machine, first failing check wins:
    /// missing token, bad signature/malformed, wrong kind, expired,
    /// revoked, not fresh.
    pub fn authorize(
        &self,
        token: Option<&str>,
        requirements: &TokenRequirements,
    ) -> Result<Admitted> {
        let token = token.ok_or(AuthError::AuthorizationRequired)?;

        // Signature first; claims below are trustworthy only after this.
        let claims = self.verifier.decode(token)?;
        let admitted = self.parse_claims(&claims)?;

        if let Some(required_kind) = requirements.kind {
            if admitted.kind != required_kind {
                tracing::debug!(
                    jti = %admitted.token_id,
                    presented = %admitted.kind,
                    required = %required_kind,
                    "token kind mismatch"
                );
                return Err(AuthError::InvalidToken);
            }
        }

        if claims.is_expired(self.clock.now()) {
            return Err(AuthError::TokenExpired);
        }

        if self.registry.is_revoked(&admitted.token_id) {
            tracing::debug!(jti = %admitted.token_id, "rejected revoked token");
            return Err(AuthError::TokenRevoked);
        }

        if requirements.require_fresh && !admitted.fresh {
            return Err(AuthError::FreshTokenRequired);
        }

        Ok(admitted)
    }

    fn parse_claims(&self, claims: &Claims) -> Result<Admitted> {
        let expires_at = claims
            .expires_at()
            .ok_or(AuthError::InvalidToken)?;

        Ok(Admitted {
            principal_id: claims.principal_id()?,
            token_id: claims.token_id()?,
            kind: claims.token_type,
            fresh: claims.fresh,
            admin: claims.admin,
            expires_at,
        })
    }
}
