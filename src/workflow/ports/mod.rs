//! Port contracts for the workflow core.
//!
//! Ports define infrastructure-agnostic interfaces used by the workflow
//! service.

pub mod notifier;
pub mod repository;

pub use notifier::{Notification, Notifier, NotifierError, NotifierResult};
pub use repository::{
    EmployeeDirectory, EmployeeDirectoryError, EmployeeDirectoryResult, WorkflowStore,
    WorkflowStoreError, WorkflowStoreResult,
};
