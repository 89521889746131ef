//! Explicit caller identity for workflow operations.
//!
//! The engine never reads an ambient authentication context; every operation
//! receives the caller's identity as a value.

use super::{EmailAddress, EmployeeId, Role};
use serde::{Deserialize, Serialize};

/// Authenticated caller identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    id: EmployeeId,
    email: EmailAddress,
    roles: Vec<Role>,
}

impl Principal {
    /// Creates a principal from an authenticated identity.
    #[must_use]
    pub fn new(id: EmployeeId, email: EmailAddress, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            id,
            email,
            roles: roles.into_iter().collect(),
        }
    }

    /// Returns the caller's employee identifier.
    #[must_use]
    pub const fn id(&self) -> EmployeeId {
        self.id
    }

    /// Returns the caller's email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the caller's granted roles.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Returns whether any granted role carries manager-level powers.
    #[must_use]
    pub fn is_manager(&self) -> bool {
        self.roles.iter().any(|role| role.is_manager())
    }
}
