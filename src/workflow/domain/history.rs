//! Append-only workflow audit entries.

use super::{EmployeeId, TaskId, TaskStatus, WorkflowEntryId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Audit record of a single status assignment.
///
/// Entries are written once and never mutated; they are removed only in bulk
/// when the parent task is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowEntry {
    id: WorkflowEntryId,
    task_id: TaskId,
    status: TaskStatus,
    updated_by: EmployeeId,
    recorded_at: DateTime<Utc>,
}

impl WorkflowEntry {
    /// Creates an audit entry timestamped by `clock`.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        status: TaskStatus,
        updated_by: EmployeeId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: WorkflowEntryId::new(),
            task_id,
            status,
            updated_by,
            recorded_at: clock.utc(),
        }
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        id: WorkflowEntryId,
        task_id: TaskId,
        status: TaskStatus,
        updated_by: EmployeeId,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task_id,
            status,
            updated_by,
            recorded_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> WorkflowEntryId {
        self.id
    }

    /// Returns the task this entry belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the status that was set.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the employee who performed the change.
    #[must_use]
    pub const fn updated_by(&self) -> EmployeeId {
        self.updated_by
    }

    /// Returns when the change was recorded.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
