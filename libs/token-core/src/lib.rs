/// Shared token library for the auth kernel
///
/// Provides the signed-token model used by every authenticated call path:
/// claims carrying identity, token kind, freshness and a unique jti, plus
/// HS256 issuance and verification built on `jsonwebtoken`.
///
/// ## Modules
///
/// - `clock`: injectable time source for deterministic expiry handling
/// - `jwt`: claims model, `TokenIssuer`, `TokenVerifier`
pub mod clock;
pub mod jwt;

pub use clock::{Clock, ManualClock, SystemClock};
pub use jwt::{Claims, SignedToken, TokenError, TokenIssuer, TokenKind, TokenVerifier};
