/// Guard stage composed around the access gate
///
/// Authorization checks wrap operations as an explicit, separately testable
/// stage instead of implicit function wrapping: a `Guard` binds the gate to
/// fixed requirements (and optionally an admin check) and call sites run
/// every request through it before touching the operation itself. The
/// guard owns no parsing or crypto; it only composes the gate's decision
/// with the permission predicate.
use std::sync::Arc;

use crate::error::{AuthError, Result};
use crate::gate::{AccessGate, Admitted, TokenRequirements};

pub struct Guard {
    gate: Arc<AccessGate>,
    requirements: TokenRequirements,
    admin_only: bool,
}

impl Guard {
    pub fn new(gate: Arc<AccessGate>, requirements: TokenRequirements) -> Self {
        Self {
            gate,
            requirements,
            admin_only: false,
        }
    }

    /// Additionally require the admitted principal to be an administrator.
    pub fn admin_only(mut self) -> Self {
        self.admin_only = true;
        self
    }

    /// Run the gate, then the permission predicate.
    pub fn admit(&self, token: Option<&str>) -> Result<Admitted> {
        let admitted = self.gate.authorize(token, &self.requirements)?;

        if self.admin_only && !admitted.admin {
            tracing::debug!(
                principal_id = %admitted.principal_id,
                "admitted principal lacks admin privileges"
            );
            return Err(AuthError::AdminRequired);
        }

        Ok(admitted)
    }
}
