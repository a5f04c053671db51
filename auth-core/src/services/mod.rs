/// Service layer for the auth kernel
///
/// - **credentials**: primary credential verification against the store
/// - **auth_service**: login, refresh, logout, registration flows
pub mod auth_service;
pub mod credentials;

pub use auth_service::AuthService;
pub use credentials::CredentialVerifier;
