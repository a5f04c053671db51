/// JWT issuance and verification
///
/// Single implementation used by every component that mints or checks
/// tokens, so all call paths agree on algorithm, claim layout, and expiry
/// semantics.
///
/// ## Security Design
///
/// - **HS256 only**: one process-wide secret loaded at startup; the
///   verifier pins the algorithm so header-driven confusion attacks fail
/// - **No hidden globals**: issuer and verifier are constructed values,
///   injected where needed
/// - **Signature before claims**: `TokenVerifier::decode` verifies the
///   signature before any claim is surfaced; expiry is then checked by the
///   caller against its injected clock
///
/// ## Usage
///
/// ```rust
/// use std::sync::Arc;
/// use token_core::{SystemClock, TokenIssuer, TokenVerifier};
///
/// let secret = b"an-actual-secret-from-configuration";
/// let issuer = TokenIssuer::new(secret, 900, 2_592_000, Arc::new(SystemClock));
/// let verifier = TokenVerifier::new(secret);
///
/// let signed = issuer
///     .issue_access_token(uuid::Uuid::new_v4(), false, true)
///     .unwrap();
/// let claims = verifier.decode(&signed.token).unwrap();
/// assert!(claims.fresh);
/// ```
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::clock::Clock;

/// Signing algorithm for all tokens.
const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Error)]
pub enum TokenError {
    /// Malformed token, bad signature, or wrong algorithm.
    #[error("invalid token")]
    Invalid,

    /// Structurally valid JWT whose claim content is unusable.
    #[error("malformed token claim: {0}")]
    MalformedClaim(&'static str),

    /// Encoding-side failure while signing.
    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Token kind, carried in the claims as `token_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// Claims embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal ID as UUID string).
    pub sub: String,
    /// Unique token identifier; the revocation key.
    pub jti: String,
    /// Token kind: access or refresh.
    pub token_type: TokenKind,
    /// True only for access tokens minted directly from a password login.
    pub fresh: bool,
    /// Administrator flag captured from the principal at issuance.
    pub admin: bool,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// Parse the subject claim into the principal's UUID.
    pub fn principal_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::MalformedClaim("sub"))
    }

    /// Parse the jti claim into the token's UUID.
    pub fn token_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.jti).map_err(|_| TokenError::MalformedClaim("jti"))
    }

    /// Expiry as a timestamp; `None` when `exp` is out of range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.exp, 0)
    }

    /// A token is expired once the current instant reaches `exp`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// An encoded token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct SignedToken {
    pub token: String,
    pub claims: Claims,
}

/// Mints signed access and refresh tokens.
///
/// Issuance has no side effects beyond constructing the token: the
/// revocation registry is never touched here.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    /// Build an issuer from the process-wide signing secret.
    ///
    /// The secret is loaded once at startup by configuration; rotation
    /// within a running process is not supported.
    pub fn new(
        secret: &[u8],
        access_ttl_secs: u64,
        refresh_ttl_secs: u64,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            access_ttl: Duration::seconds(access_ttl_secs as i64),
            refresh_ttl: Duration::seconds(refresh_ttl_secs as i64),
            clock,
        }
    }

    /// Mint a short-lived access token.
    ///
    /// `fresh` must be true only when the caller has just verified the
    /// principal's primary credentials; tokens derived through the refresh
    /// flow are never fresh.
    pub fn issue_access_token(
        &self,
        principal_id: Uuid,
        admin: bool,
        fresh: bool,
    ) -> Result<SignedToken, TokenError> {
        self.issue(principal_id, TokenKind::Access, admin, fresh, self.access_ttl)
    }

    /// Mint a long-lived refresh token. Refresh tokens are never fresh.
    pub fn issue_refresh_token(
        &self,
        principal_id: Uuid,
        admin: bool,
    ) -> Result<SignedToken, TokenError> {
        self.issue(principal_id, TokenKind::Refresh, admin, false, self.refresh_ttl)
    }

    /// Access-token lifetime, for `expires_in` style responses.
    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    fn issue(
        &self,
        principal_id: Uuid,
        kind: TokenKind,
        admin: bool,
        fresh: bool,
        ttl: Duration,
    ) -> Result<SignedToken, TokenError> {
        let now = self.clock.now();
        let claims = Claims {
            sub: principal_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            token_type: kind,
            fresh,
            admin,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        let token = encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        tracing::debug!(
            principal_id = %principal_id,
            jti = %claims.jti,
            kind = %kind,
            "issued token"
        );

        Ok(SignedToken { token, claims })
    }
}

/// Verifies token signatures and surfaces claims.
///
/// Kept separate from [`TokenIssuer`] so components that only check tokens
/// never hold signing capability.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(JWT_ALGORITHM);
        // Expiry is evaluated by the access gate against its injected
        // clock; the library's wall-clock check would race with it.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Verify the signature and decode the claims.
    ///
    /// A token that fails here yields no trustworthy claims at all, so the
    /// error intentionally carries no detail from the token body.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ManualClock, SystemClock};

    const TEST_SECRET: &[u8] = b"unit-test-signing-secret-0123456789abcdef";

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(TEST_SECRET, 900, 2_592_000, Arc::new(SystemClock))
    }

    #[test]
    fn test_issue_access_token_shape() {
        let signed = issuer()
            .issue_access_token(Uuid::new_v4(), false, true)
            .expect("issuance should succeed");

        // JWT wire format has three dot-separated parts
        assert_eq!(signed.token.matches('.').count(), 2);
        assert_eq!(signed.claims.token_type, TokenKind::Access);
        assert!(signed.claims.fresh);
    }

    #[test]
    fn test_decode_valid_token() {
        let principal_id = Uuid::new_v4();
        let signed = issuer()
            .issue_access_token(principal_id, true, false)
            .expect("issuance should succeed");

        let claims = TokenVerifier::new(TEST_SECRET)
            .decode(&signed.token)
            .expect("valid token should decode");

        assert_eq!(claims.principal_id().unwrap(), principal_id);
        assert_eq!(claims.token_type, TokenKind::Access);
        assert!(claims.admin);
        assert!(!claims.fresh);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let verifier = TokenVerifier::new(TEST_SECRET);
        assert!(matches!(
            verifier.decode("not.a.token"),
            Err(TokenError::Invalid)
        ));
    }

    #[test]
    fn test_decode_tampered_token_fails() {
        let signed = issuer()
            .issue_access_token(Uuid::new_v4(), false, true)
            .expect("issuance should succeed");

        let tampered = signed.token.replace('a', "b");
        assert!(TokenVerifier::new(TEST_SECRET).decode(&tampered).is_err());
    }

    #[test]
    fn test_decode_with_wrong_secret_fails() {
        let signed = issuer()
            .issue_access_token(Uuid::new_v4(), false, true)
            .expect("issuance should succeed");

        let other = TokenVerifier::new(b"a-different-secret-entirely-abcdef");
        assert!(other.decode(&signed.token).is_err());
    }

    #[test]
    fn test_refresh_token_outlives_access_token() {
        let issuer = issuer();
        let principal_id = Uuid::new_v4();

        let access = issuer.issue_access_token(principal_id, false, true).unwrap();
        let refresh = issuer.issue_refresh_token(principal_id, false).unwrap();

        assert!(refresh.claims.exp > access.claims.exp);
        assert_eq!(refresh.claims.token_type, TokenKind::Refresh);
        assert!(!refresh.claims.fresh);
    }

    #[test]
    fn test_jti_unique_per_token() {
        let issuer = issuer();
        let principal_id = Uuid::new_v4();

        let a = issuer.issue_access_token(principal_id, false, true).unwrap();
        let b = issuer.issue_access_token(principal_id, false, true).unwrap();

        assert_ne!(a.claims.jti, b.claims.jti);
    }

    #[test]
    fn test_expiry_follows_injected_clock() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let issuer = TokenIssuer::new(TEST_SECRET, 900, 2_592_000, clock.clone());

        let signed = issuer
            .issue_access_token(Uuid::new_v4(), false, true)
            .unwrap();

        assert!(!signed.claims.is_expired(clock.now()));

        clock.advance(Duration::minutes(20));
        assert!(signed.claims.is_expired(clock.now()));

        // Signature stays valid after expiry; rejection is the gate's call
        assert!(TokenVerifier::new(TEST_SECRET).decode(&signed.token).is_ok());
    }

    #[test]
    fn test_token_kind_wire_names() {
        assert_eq!(serde_json::to_string(&TokenKind::Access).unwrap(), "\"access\"");
        assert_eq!(serde_json::to_string(&TokenKind::Refresh).unwrap(), "\"refresh\"");
    }
}
