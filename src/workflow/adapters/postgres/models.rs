//! Diesel row models for workflow persistence.

use super::schema::{employees, task_workflows, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Task priority.
    pub priority: String,
    /// Current workflow status.
    pub status: String,
    /// Owning employee.
    pub assignee_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Task priority.
    pub priority: String,
    /// Current workflow status.
    pub status: String,
    /// Owning employee.
    pub assignee_id: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Update model for mutable task fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Task priority.
    pub priority: String,
    /// Current workflow status.
    pub status: String,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for employee records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EmployeeRow {
    /// Employee identifier.
    pub id: uuid::Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Organisational role.
    pub role: String,
    /// Soft-delete flag.
    pub deleted: bool,
}

/// Insert model for employee records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = employees)]
pub struct NewEmployeeRow {
    /// Employee identifier.
    pub id: uuid::Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Organisational role.
    pub role: String,
    /// Soft-delete flag.
    pub deleted: bool,
}

/// Query result row for workflow audit entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_workflows)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WorkflowEntryRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Task the entry belongs to.
    pub task_id: uuid::Uuid,
    /// Status that was set.
    pub status: String,
    /// Employee who performed the change.
    pub updated_by: uuid::Uuid,
    /// When the change was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Insert model for workflow audit entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_workflows)]
pub struct NewWorkflowEntryRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Task the entry belongs to.
    pub task_id: uuid::Uuid,
    /// Status that was set.
    pub status: String,
    /// Employee who performed the change.
    pub updated_by: uuid::Uuid,
    /// When the change was recorded.
    pub recorded_at: DateTime<Utc>,
}
