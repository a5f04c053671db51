/// Principal store port
///
/// Persistence is an external collaborator: the kernel talks to it through
/// this trait and never owns connection management or schema concerns.
/// `InMemoryPrincipalStore` is the reference implementation used by tests
/// and embedders without a backing database.
pub mod memory;

use crate::error::Result;
use crate::models::Principal;
use async_trait::async_trait;
use uuid::Uuid;

pub use memory::InMemoryPrincipalStore;

/// Fields needed to create a principal; the store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewPrincipal {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub admin: bool,
}

#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// Look up exactly one principal by username or email.
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Principal>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Principal>>;

    /// Create a principal. Username and email are unique; a duplicate of
    /// either surfaces as a conflict without mutating the store.
    async fn create(&self, new: NewPrincipal) -> Result<Principal>;

    /// Remove a principal. Outstanding tokens are not touched here; they
    /// become orphaned and die by expiry or revocation.
    async fn delete(&self, id: Uuid) -> Result<()>;
}
