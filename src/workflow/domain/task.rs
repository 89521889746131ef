//! Task aggregate root and the status workflow state machine.

use super::{
    Employee, EmployeeId, ParsePriorityError, ParseStatusError, TaskId, WorkflowDomainError,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been created but work has not started.
    Created,
    /// Task is being worked on by its owner.
    InProgress,
    /// Task owner considers the work complete and awaits review.
    Resolved,
    /// A manager has accepted the resolution.
    Done,
}

/// Authorization required to perform a legal status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionGate {
    /// Only the task's assigned owner may perform the transition.
    Owner,
    /// Only a head manager or HR manager may perform the transition.
    Manager,
}

impl TransitionGate {
    /// Returns whether `caller` satisfies this gate for `task`.
    ///
    /// Evaluated against the directory-resolved employee rather than a
    /// presented token, so the role that authorizes a transition is the
    /// same one the audit entry attributes it to.
    #[must_use]
    pub fn permits(self, caller: &Employee, task: &Task) -> bool {
        match self {
            Self::Owner => caller.id() == task.assignee(),
            Self::Manager => caller.role().is_manager(),
        }
    }
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Done => "done",
        }
    }

    /// Returns the authorization gate for the `(self, to)` transition, or
    /// `None` when the transition is not in the table.
    ///
    /// The table is the single source of both legality and the required
    /// authorization; callers never consult one without the other.
    #[must_use]
    pub const fn gate_for(self, to: Self) -> Option<TransitionGate> {
        match (self, to) {
            (Self::Created, Self::InProgress) | (Self::InProgress, Self::Resolved) => {
                Some(TransitionGate::Owner)
            }
            (Self::Resolved, Self::InProgress | Self::Done) => Some(TransitionGate::Manager),
            _ => None,
        }
    }

    /// Returns whether the `(self, to)` transition is legal for any caller.
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        self.gate_for(to).is_some()
    }

    /// Returns whether no legal transition leaves this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "created" => Ok(Self::Created),
            "in_progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "done" => Ok(Self::Done),
            _ => Err(ParseStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Low urgency.
    Low,
    /// Default urgency.
    Medium,
    /// High urgency.
    High,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    priority: TaskPriority,
    status: TaskStatus,
    assignee: EmployeeId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted owner reference.
    pub assignee: EmployeeId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task assigned to an employee, starting in
    /// [`TaskStatus::Created`].
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::EmptyTitle`] when the title is blank.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: TaskPriority,
        assignee: EmployeeId,
        clock: &impl Clock,
    ) -> Result<Self, WorkflowDomainError> {
        let task_title: String = title.into();
        if task_title.trim().is_empty() {
            return Err(WorkflowDomainError::EmptyTitle);
        }
        let timestamp = clock.utc();

        Ok(Self {
            id: TaskId::new(),
            title: task_title,
            description: description.into(),
            priority,
            status: TaskStatus::Created,
            assignee,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            assignee: data.assignee,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the current workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the owning employee reference.
    #[must_use]
    pub const fn assignee(&self) -> EmployeeId {
        self.assignee
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the task to `to`, validating against the transition table.
    ///
    /// Authorization is the caller's concern; the aggregate only enforces
    /// transition legality.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowDomainError::IllegalTransition`] when `(current,
    /// to)` is not in the table. The task is left unchanged on error.
    pub fn apply_status(
        &mut self,
        to: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), WorkflowDomainError> {
        if !self.status.can_transition_to(to) {
            return Err(WorkflowDomainError::IllegalTransition {
                task_id: self.id,
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.updated_at = clock.utc();
        Ok(())
    }
}
