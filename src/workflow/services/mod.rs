//! Application services for workflow orchestration.

mod engine;

pub use engine::{ErrorKind, SetStatusRequest, TaskWorkflowService, WorkflowError, WorkflowResult};
