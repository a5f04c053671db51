/// Token revocation registry
///
/// In-memory jti blocklist consulted on every authenticated request.
/// Entries are written on logout and on refresh-token use; a jti revoked on
/// one thread is immediately visible to concurrent readers on any other.
///
/// ## Lifecycle
///
/// Constructed at process start and injected wherever revocation decisions
/// are made; never a hidden global. Entries carry the revoked token's
/// natural expiry so [`RevocationRegistry::compact`] can drop entries whose
/// token would already be rejected as expired. Process restart empties the
/// registry; multi-process deployments need a shared external store behind
/// the same interface.
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct RevocationRegistry {
    revoked: DashMap<Uuid, DateTime<Utc>>,
}

impl RevocationRegistry {
    pub fn new() -> Self {
        Self {
            revoked: DashMap::new(),
        }
    }

    /// Mark a jti as no longer honorable.
    ///
    /// Idempotent: revoking the same jti twice leaves one entry.
    /// `expires_at` is the revoked token's own expiry, kept so compaction
    /// knows when the entry stops mattering.
    pub fn revoke(&self, jti: Uuid, expires_at: DateTime<Utc>) {
        self.revoked.insert(jti, expires_at);
        tracing::info!(jti = %jti, expires_at = %expires_at, "token revoked");
    }

    /// O(1) membership test, linearizable with concurrent `revoke` calls.
    pub fn is_revoked(&self, jti: &Uuid) -> bool {
        self.revoked.contains_key(jti)
    }

    /// Drop entries for tokens that have naturally expired.
    ///
    /// An expired token is already rejected on expiry grounds, so removal
    /// never changes an admission decision. Returns the number of entries
    /// removed.
    pub fn compact(&self, now: DateTime<Utc>) -> usize {
        let before = self.revoked.len();
        self.revoked.retain(|_, expires_at| *expires_at > now);
        let removed = before.saturating_sub(self.revoked.len());
        if removed > 0 {
            tracing::debug!(removed, "compacted revocation registry");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.revoked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revoked.is_empty()
    }
}
