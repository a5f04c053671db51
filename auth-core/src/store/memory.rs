/// In-memory principal store
///
/// Concurrent-map implementation of the store port. Uniqueness of username
/// and email is enforced with secondary indexes claimed entry-first, so two
/// racing registrations for the same name cannot both succeed.
use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::{AuthError, Result};
use crate::models::Principal;
use crate::store::{NewPrincipal, PrincipalStore};

#[derive(Debug, Default)]
pub struct InMemoryPrincipalStore {
    principals: DashMap<Uuid, Principal>,
    by_username: DashMap<String, Uuid>,
    by_email: DashMap<String, Uuid>,
}

impl InMemoryPrincipalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.principals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.principals.is_empty()
    }
}

#[async_trait]
impl PrincipalStore for InMemoryPrincipalStore {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Principal>> {
        let id = self
            .by_username
            .get(identifier)
            .or_else(|| self.by_email.get(identifier))
            .map(|entry| *entry.value());

        Ok(id.and_then(|id| self.principals.get(&id).map(|p| p.clone())))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Principal>> {
        Ok(self.principals.get(&id).map(|p| p.clone()))
    }

    async fn create(&self, new: NewPrincipal) -> Result<Principal> {
        let id = Uuid::new_v4();

        // Claim the username index first; it doubles as the creation lock
        // for this username.
        match self.by_username.entry(new.username.clone()) {
            Entry::Occupied(_) => return Err(AuthError::UsernameAlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        // Claim the email index, rolling back the username claim on
        // conflict so the store stays unmutated.
        match self.by_email.entry(new.email.clone()) {
            Entry::Occupied(_) => {
                self.by_username.remove(&new.username);
                return Err(AuthError::EmailAlreadyExists);
            }
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        let principal = Principal {
            id,
            username: new.username,
            email: new.email,
            password_hash: new.password_hash,
            admin: new.admin,
            created_at: Utc::now(),
        };
        self.principals.insert(id, principal.clone());

        Ok(principal)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let (_, principal) = self
            .principals
            .remove(&id)
            .ok_or(AuthError::PrincipalNotFound)?;

        self.by_username.remove(&principal.username);
        self.by_email.remove(&principal.email);

        tracing::info!(principal_id = %id, "principal deleted");
        Ok(())
    }
}
