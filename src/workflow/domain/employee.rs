//! Employee record, role, and validated email address types.

use super::{EmployeeId, ParseRoleError, WorkflowDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Organisational role attached to an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular employee; may drive their own tasks forward.
    Employee,
    /// Head manager; may review and finalize resolved tasks.
    HeadManager,
    /// HR manager; same workflow powers as a head manager.
    HrManager,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::HeadManager => "head_manager",
            Self::HrManager => "hr_manager",
        }
    }

    /// Returns whether this role carries manager-level workflow powers.
    #[must_use]
    pub const fn is_manager(self) -> bool {
        matches!(self, Self::HeadManager | Self::HrManager)
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "employee" => Ok(Self::Employee),
            "head_manager" => Ok(Self::HeadManager),
            "hr_manager" => Ok(Self::HrManager),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated email address used as the caller lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Validation is shape-only: a non-empty local part and a non-empty
    /// domain separated by exactly one `@`, with no whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::InvalidEmail`] when the value does not
    /// match that shape.
    pub fn new(value: impl Into<String>) -> Result<Self, WorkflowDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let mut segments = normalized.split('@');
        let local = segments.next().unwrap_or_default();
        let domain = segments.next().unwrap_or_default();
        let has_more_segments = segments.next().is_some();
        let is_valid = !local.is_empty()
            && !domain.is_empty()
            && domain.contains('.')
            && !has_more_segments
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(WorkflowDomainError::InvalidEmail(raw));
        }

        Ok(Self(normalized.to_ascii_lowercase()))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Employee record as seen by the workflow core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    first_name: String,
    last_name: String,
    email: EmailAddress,
    role: Role,
    deleted: bool,
}

impl Employee {
    /// Creates an active employee record.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: EmailAddress,
        role: Role,
    ) -> Self {
        Self {
            id: EmployeeId::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email,
            role,
            deleted: false,
        }
    }

    /// Reconstructs an employee from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: EmployeeId,
        first_name: String,
        last_name: String,
        email: EmailAddress,
        role: Role,
        deleted: bool,
    ) -> Self {
        Self {
            id,
            first_name,
            last_name,
            email,
            role,
            deleted,
        }
    }

    /// Returns the employee identifier.
    #[must_use]
    pub const fn id(&self) -> EmployeeId {
        self.id
    }

    /// Returns the first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the organisational role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns whether the record is soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Soft-deletes the record, hiding it from directory lookup.
    pub const fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}
