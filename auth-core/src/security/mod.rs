/// Security primitives for the auth kernel
///
/// - **password**: Argon2id password hashing and verification
/// - **revocation**: in-memory jti blocklist shared by all request paths
pub mod password;
pub mod revocation;

pub use password::{hash_password, verify_password};
pub use revocation::RevocationRegistry;
