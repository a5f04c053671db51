use thiserror::Error;
use token_core::TokenError;

pub type Result<T> = std::result::Result<T, AuthError>;

/// Error taxonomy for the auth kernel.
///
/// Every rejection is a terminal, structured result; nothing here is ever
/// raised as a panic across the public API. Credential failures are
/// deliberately generic so callers cannot distinguish an unknown identifier
/// from a wrong secret.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Request does not contain a token")]
    AuthorizationRequired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Fresh token required")]
    FreshTokenRequired,

    #[error("Administrator privileges required")]
    AdminRequired,

    #[error("Username already exists")]
    UsernameAlreadyExists,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Principal not found")]
    PrincipalNotFound,

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Stable machine-readable code for each rejection.
    ///
    /// Clients branch on these, never on display text: retrying through the
    /// refresh flow is correct on `token_expired` and never on
    /// `token_revoked`.
    pub fn reason_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::AuthorizationRequired => "authorization_required",
            AuthError::InvalidToken => "invalid_token",
            AuthError::TokenExpired => "token_expired",
            AuthError::TokenRevoked => "token_revoked",
            AuthError::FreshTokenRequired => "fresh_token_required",
            AuthError::AdminRequired => "admin_required",
            AuthError::UsernameAlreadyExists | AuthError::EmailAlreadyExists => "conflict",
            AuthError::PrincipalNotFound => "not_found",
            AuthError::WeakPassword(_) => "weak_password",
            AuthError::Validation(_) => "invalid_input",
            AuthError::Internal(_) => "internal_error",
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            // Bad signature or unusable claims: nothing in the token can be
            // trusted, so both collapse to the same rejection.
            TokenError::Invalid | TokenError::MalformedClaim(_) => AuthError::InvalidToken,
            TokenError::Signing(msg) => AuthError::Internal(msg),
        }
    }
}

impl From<validator::ValidationErrors> for AuthError {
    fn from(err: validator::ValidationErrors) -> Self {
        AuthError::Validation(err.to_string())
    }
}
