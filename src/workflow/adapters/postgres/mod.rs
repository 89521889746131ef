//! `PostgreSQL` adapters for workflow persistence.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresEmployeeDirectory, PostgresWorkflowStore, WorkflowPgPool};
