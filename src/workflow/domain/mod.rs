//! Domain model for the task workflow core.
//!
//! The domain owns the status state machine, the transition/authorization
//! table, and the audit entry shape, keeping all infrastructure concerns
//! outside the boundary.

mod employee;
mod error;
mod history;
mod ids;
mod principal;
mod task;

pub use employee::{EmailAddress, Employee, Role};
pub use error::{ParsePriorityError, ParseRoleError, ParseStatusError, WorkflowDomainError};
pub use history::WorkflowEntry;
pub use ids::{EmployeeId, TaskId, WorkflowEntryId};
pub use principal::Principal;
pub use task::{PersistedTaskData, Task, TaskPriority, TaskStatus, TransitionGate};
