//! Task workflow engine: status transitions, authorization, and audit trail.

use crate::workflow::{
    domain::{
        EmailAddress, Principal, Task, TaskId, TaskStatus, TransitionGate, WorkflowDomainError,
        WorkflowEntry,
    },
    ports::{
        EmployeeDirectory, EmployeeDirectoryError, Notification, Notifier, WorkflowStore,
        WorkflowStoreError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Request payload for a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetStatusRequest {
    task_id: TaskId,
    status: TaskStatus,
}

impl SetStatusRequest {
    /// Creates a status change request.
    #[must_use]
    pub const fn new(task_id: TaskId, status: TaskStatus) -> Self {
        Self { task_id, status }
    }

    /// Returns the targeted task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the requested status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }
}

/// External error classification for workflow failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The referenced task does not exist.
    NotFound,
    /// Illegal transition shape, unauthorized caller, or malformed input.
    BadRequest,
    /// The caller identity does not resolve to an active employee; indicates
    /// an authentication-layer misconfiguration rather than a user error.
    AuthFault,
    /// Infrastructure failure in a collaborating store.
    Internal,
}

/// Errors returned by workflow engine operations.
#[derive(Debug, Clone, Error)]
pub enum WorkflowError {
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Domain validation failed (illegal transition shape).
    #[error(transparent)]
    Domain(#[from] WorkflowDomainError),

    /// The transition is legal but the caller may not perform it.
    #[error("caller is not permitted to move task {task_id} from {from} to {to}")]
    TransitionNotPermitted {
        /// Targeted task.
        task_id: TaskId,
        /// Status the task currently holds.
        from: TaskStatus,
        /// Status that was requested.
        to: TaskStatus,
        /// Gate the caller failed to satisfy.
        gate: TransitionGate,
    },

    /// The caller is neither the task owner nor a manager.
    #[error("caller is not permitted to view the history of task {task_id}")]
    HistoryNotPermitted {
        /// Targeted task.
        task_id: TaskId,
    },

    /// The caller's email does not resolve to an active employee.
    #[error("caller identity {0} does not resolve to an active employee")]
    UnresolvedCaller(EmailAddress),

    /// Workflow store failure.
    #[error(transparent)]
    Store(#[from] WorkflowStoreError),

    /// Employee directory failure.
    #[error(transparent)]
    Directory(#[from] EmployeeDirectoryError),
}

impl WorkflowError {
    /// Maps the error to its external classification.
    ///
    /// Illegal transitions and failed authorization both map to
    /// [`ErrorKind::BadRequest`]; the variants stay distinct so callers and
    /// tests can still tell them apart.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::TaskNotFound(_) => ErrorKind::NotFound,
            Self::Domain(_)
            | Self::TransitionNotPermitted { .. }
            | Self::HistoryNotPermitted { .. } => ErrorKind::BadRequest,
            Self::UnresolvedCaller(_) => ErrorKind::AuthFault,
            Self::Store(_) | Self::Directory(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for workflow engine operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Task workflow orchestration service.
#[derive(Clone)]
pub struct TaskWorkflowService<S, E, N, C>
where
    S: WorkflowStore,
    E: EmployeeDirectory,
    N: Notifier,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    directory: Arc<E>,
    notifier: Arc<N>,
    clock: Arc<C>,
}

impl<S, E, N, C> TaskWorkflowService<S, E, N, C>
where
    S: WorkflowStore,
    E: EmployeeDirectory,
    N: Notifier,
    C: Clock + Send + Sync,
{
    /// Creates a new workflow service.
    #[must_use]
    pub const fn new(store: Arc<S>, directory: Arc<E>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        Self {
            store,
            directory,
            notifier,
            clock,
        }
    }

    /// Moves a task to the requested status on behalf of `principal`.
    ///
    /// Validates the transition against the legality table, checks the
    /// directory-resolved caller against the transition's gate, then
    /// persists the task and its audit entry in one unit of work. Either
    /// both writes take effect or neither does. Manager-gated transitions
    /// additionally notify the task owner; notification failures are logged
    /// and do not affect the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::TaskNotFound`] when the task does not exist,
    /// [`WorkflowError::UnresolvedCaller`] when the principal's email does
    /// not resolve to an active employee, [`WorkflowError::Domain`] when the
    /// transition shape is illegal, [`WorkflowError::TransitionNotPermitted`]
    /// when the caller fails the gate, and repository errors when a store
    /// fails.
    #[tracing::instrument(skip(self, principal), fields(caller = %principal.email()))]
    pub async fn set_status(
        &self,
        principal: &Principal,
        request: SetStatusRequest,
    ) -> WorkflowResult<Task> {
        let mut task = self
            .store
            .find_by_id(request.task_id())
            .await?
            .ok_or_else(|| WorkflowError::TaskNotFound(request.task_id()))?;

        let caller = self
            .directory
            .find_active_by_email(principal.email())
            .await?
            .ok_or_else(|| WorkflowError::UnresolvedCaller(principal.email().clone()))?;

        let from = task.status();
        let to = request.status();
        let gate = from.gate_for(to).ok_or_else(|| {
            WorkflowError::Domain(WorkflowDomainError::IllegalTransition {
                task_id: task.id(),
                from,
                to,
            })
        })?;
        if !gate.permits(&caller, &task) {
            return Err(WorkflowError::TransitionNotPermitted {
                task_id: task.id(),
                from,
                to,
                gate,
            });
        }

        task.apply_status(to, &*self.clock)?;
        let entry = WorkflowEntry::new(task.id(), to, caller.id(), &*self.clock);
        self.store.commit_transition(&task, &entry).await?;
        debug!(task_id = %task.id(), %from, %to, "task status updated");

        if gate == TransitionGate::Manager {
            self.notify_owner(&task).await;
        }

        Ok(task)
    }

    /// Returns the full audit trail for a task in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::TaskNotFound`] when the task does not exist,
    /// [`WorkflowError::HistoryNotPermitted`] when the caller is neither the
    /// owner nor a manager, and repository errors when a store fails.
    #[tracing::instrument(skip(self, principal), fields(caller = %principal.email()))]
    pub async fn list_history(
        &self,
        principal: &Principal,
        task_id: TaskId,
    ) -> WorkflowResult<Vec<WorkflowEntry>> {
        let task = self
            .store
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| WorkflowError::TaskNotFound(task_id))?;

        if principal.id() != task.assignee() && !principal.is_manager() {
            return Err(WorkflowError::HistoryNotPermitted { task_id });
        }

        Ok(self.store.find_history(task_id).await?)
    }

    /// Notifies the task owner of a manager-initiated status change.
    ///
    /// Best-effort: lookup and delivery failures are logged and discarded.
    async fn notify_owner(&self, task: &Task) {
        let owner = match self.directory.find_active_by_id(task.assignee()).await {
            Ok(Some(owner)) => owner,
            Ok(None) => {
                warn!(task_id = %task.id(), "task owner not found, skipping notification");
                return;
            }
            Err(error) => {
                warn!(task_id = %task.id(), %error, "owner lookup failed, skipping notification");
                return;
            }
        };

        let notification = Notification::new(
            owner.email().clone(),
            "Task status updated",
            format!("Task '{}' is now {}.", task.title(), task.status()),
        );
        if let Err(error) = self.notifier.send(&notification).await {
            warn!(task_id = %task.id(), %error, "notification delivery failed");
        }
    }
}
