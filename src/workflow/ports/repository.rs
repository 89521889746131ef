//! Persistence ports for workflow storage and the employee directory.

use crate::workflow::domain::{EmailAddress, Employee, EmployeeId, Task, TaskId, WorkflowEntry};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for workflow store operations.
pub type WorkflowStoreResult<T> = Result<T, WorkflowStoreError>;

/// Persistence contract for tasks and their audit trail.
///
/// A task and its workflow history form one consistency boundary, so a
/// single port owns both. Implementations must serialize writes to the same
/// task so that two concurrent status changes cannot silently overwrite
/// each other.
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowStoreError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &Task) -> WorkflowStoreResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> WorkflowStoreResult<Option<Task>>;

    /// Persists a transitioned task together with its audit entry.
    ///
    /// The two writes form one unit of work: either both take effect or
    /// neither does.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowStoreError::NotFound`] when the task does not
    /// exist; in that case no entry is appended.
    async fn commit_transition(
        &self,
        task: &Task,
        entry: &WorkflowEntry,
    ) -> WorkflowStoreResult<()>;

    /// Returns all audit entries for a task in creation order.
    async fn find_history(&self, task_id: TaskId) -> WorkflowStoreResult<Vec<WorkflowEntry>>;

    /// Removes every audit entry for a task, returning how many were
    /// deleted.
    ///
    /// Used by the external task-deletion path, which purges history
    /// together with the task row.
    async fn delete_history(&self, task_id: TaskId) -> WorkflowStoreResult<usize>;
}

/// Errors returned by workflow store implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkflowStoreError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkflowStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Result type for employee directory operations.
pub type EmployeeDirectoryResult<T> = Result<T, EmployeeDirectoryError>;

/// Employee lookup contract.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Stores a new employee record.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeDirectoryError::DuplicateEmployee`] when the ID or
    /// email is already registered.
    async fn store(&self, employee: &Employee) -> EmployeeDirectoryResult<()>;

    /// Finds an active (not soft-deleted) employee by email address.
    ///
    /// Returns `None` when no active employee carries the address.
    async fn find_active_by_email(
        &self,
        email: &EmailAddress,
    ) -> EmployeeDirectoryResult<Option<Employee>>;

    /// Finds an active (not soft-deleted) employee by identifier.
    ///
    /// Returns `None` when the employee does not exist or is soft-deleted.
    async fn find_active_by_id(&self, id: EmployeeId)
    -> EmployeeDirectoryResult<Option<Employee>>;
}

/// Errors returned by employee directory implementations.
#[derive(Debug, Clone, Error)]
pub enum EmployeeDirectoryError {
    /// An employee with the same identifier or email already exists.
    #[error("duplicate employee: {0}")]
    DuplicateEmployee(EmployeeId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl EmployeeDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
