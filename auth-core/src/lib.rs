/// Auth kernel library
///
/// Token lifecycle and access control: credential verification, signed
/// access/refresh token issuance, an in-memory revocation registry, and a
/// per-request access gate producing machine-readable decisions. Transport,
/// persistence, and delivery concerns stay outside; this crate receives
/// identity claims and returns tokens and decisions.
///
/// ## Modules
///
/// - `config`: environment-driven settings
/// - `error`: error taxonomy and stable reason codes
/// - `gate`: access gate and guard/interceptor stage
/// - `models`: principal record and request/response DTOs
/// - `security`: password hashing, revocation registry
/// - `services`: credential verifier and auth flows
/// - `store`: principal-store port with an in-memory reference impl
/// - `validators`: input validation
pub mod config;
pub mod error;
pub mod gate;
pub mod models;
pub mod security;
pub mod services;
pub mod store;
pub mod validators;

pub use error::{AuthError, Result};
pub use gate::{AccessGate, Admitted, Guard, TokenRequirements};
pub use models::{LoginRequest, Principal, RegisterRequest, TokenPair};
pub use security::RevocationRegistry;
pub use services::{AuthService, CredentialVerifier};
pub use store::{InMemoryPrincipalStore, NewPrincipal, PrincipalStore};
