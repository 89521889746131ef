//! `PostgreSQL` repository implementations for workflow storage.

use super::{
    models::{
        EmployeeRow, NewEmployeeRow, NewTaskRow, NewWorkflowEntryRow, TaskChangeset, TaskRow,
        WorkflowEntryRow,
    },
    schema::{employees, task_workflows, tasks},
};
use crate::workflow::{
    domain::{
        EmailAddress, Employee, EmployeeId, PersistedTaskData, Role, Task, TaskId, TaskPriority,
        TaskStatus, WorkflowEntry, WorkflowEntryId,
    },
    ports::{
        EmployeeDirectory, EmployeeDirectoryError, EmployeeDirectoryResult, WorkflowStore,
        WorkflowStoreError, WorkflowStoreResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by workflow adapters.
pub type WorkflowPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed workflow store.
///
/// Tasks and their audit entries live in the same database, so a
/// transition commit runs both writes inside one transaction.
#[derive(Debug, Clone)]
pub struct PostgresWorkflowStore {
    pool: WorkflowPgPool,
}

impl PostgresWorkflowStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: WorkflowPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> WorkflowStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> WorkflowStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(WorkflowStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(WorkflowStoreError::persistence)?
    }
}

#[async_trait]
impl WorkflowStore for PostgresWorkflowStore {
    async fn store(&self, task: &Task) -> WorkflowStoreResult<()> {
        let task_id = task.id();
        let new_row = task_to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        WorkflowStoreError::DuplicateTask(task_id)
                    }
                    _ => WorkflowStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> WorkflowStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(WorkflowStoreError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn commit_transition(
        &self,
        task: &Task,
        entry: &WorkflowEntry,
    ) -> WorkflowStoreResult<()> {
        let task_id = task.id();
        let changeset = task_to_changeset(task);
        let new_entry = entry_to_new_row(entry);

        self.run_blocking(move |connection| {
            connection
                .transaction(|txn| {
                    let updated =
                        diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                            .set(&changeset)
                            .execute(txn)?;
                    if updated == 0 {
                        // Rolls the transaction back before the insert.
                        return Err(DieselError::NotFound);
                    }
                    diesel::insert_into(task_workflows::table)
                        .values(&new_entry)
                        .execute(txn)?;
                    Ok(())
                })
                .map_err(|err| match err {
                    DieselError::NotFound => WorkflowStoreError::NotFound(task_id),
                    _ => WorkflowStoreError::persistence(err),
                })
        })
        .await
    }

    async fn find_history(&self, task_id: TaskId) -> WorkflowStoreResult<Vec<WorkflowEntry>> {
        self.run_blocking(move |connection| {
            let rows = task_workflows::table
                .filter(task_workflows::task_id.eq(task_id.into_inner()))
                .order(task_workflows::recorded_at.asc())
                .select(WorkflowEntryRow::as_select())
                .load::<WorkflowEntryRow>(connection)
                .map_err(WorkflowStoreError::persistence)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }

    async fn delete_history(&self, task_id: TaskId) -> WorkflowStoreResult<usize> {
        self.run_blocking(move |connection| {
            diesel::delete(
                task_workflows::table.filter(task_workflows::task_id.eq(task_id.into_inner())),
            )
            .execute(connection)
            .map_err(WorkflowStoreError::persistence)
        })
        .await
    }
}

fn task_to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        assignee_id: task.assignee().into_inner(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn task_to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        updated_at: task.updated_at(),
    }
}

fn entry_to_new_row(entry: &WorkflowEntry) -> NewWorkflowEntryRow {
    NewWorkflowEntryRow {
        id: entry.id().into_inner(),
        task_id: entry.task_id().into_inner(),
        status: entry.status().as_str().to_owned(),
        updated_by: entry.updated_by().into_inner(),
        recorded_at: entry.recorded_at(),
    }
}

fn row_to_task(row: TaskRow) -> WorkflowStoreResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        priority: persisted_priority,
        status: persisted_status,
        assignee_id,
        created_at,
        updated_at,
    } = row;

    let priority = TaskPriority::try_from(persisted_priority.as_str())
        .map_err(WorkflowStoreError::persistence)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(WorkflowStoreError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        priority,
        status,
        assignee: EmployeeId::from_uuid(assignee_id),
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn row_to_entry(row: WorkflowEntryRow) -> WorkflowStoreResult<WorkflowEntry> {
    let WorkflowEntryRow {
        id,
        task_id,
        status: persisted_status,
        updated_by,
        recorded_at,
    } = row;

    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(WorkflowStoreError::persistence)?;

    Ok(WorkflowEntry::from_persisted(
        WorkflowEntryId::from_uuid(id),
        TaskId::from_uuid(task_id),
        status,
        EmployeeId::from_uuid(updated_by),
        recorded_at,
    ))
}

/// `PostgreSQL`-backed employee directory.
#[derive(Debug, Clone)]
pub struct PostgresEmployeeDirectory {
    pool: WorkflowPgPool,
}

impl PostgresEmployeeDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: WorkflowPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> EmployeeDirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> EmployeeDirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(EmployeeDirectoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(EmployeeDirectoryError::persistence)?
    }
}

#[async_trait]
impl EmployeeDirectory for PostgresEmployeeDirectory {
    async fn store(&self, employee: &Employee) -> EmployeeDirectoryResult<()> {
        let employee_id = employee.id();
        let new_row = NewEmployeeRow {
            id: employee_id.into_inner(),
            first_name: employee.first_name().to_owned(),
            last_name: employee.last_name().to_owned(),
            email: employee.email().as_str().to_owned(),
            role: employee.role().as_str().to_owned(),
            deleted: employee.is_deleted(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(employees::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        EmployeeDirectoryError::DuplicateEmployee(employee_id)
                    }
                    _ => EmployeeDirectoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_active_by_email(
        &self,
        email: &EmailAddress,
    ) -> EmployeeDirectoryResult<Option<Employee>> {
        let lookup_email = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = employees::table
                .filter(employees::email.eq(lookup_email))
                .filter(employees::deleted.eq(false))
                .select(EmployeeRow::as_select())
                .first::<EmployeeRow>(connection)
                .optional()
                .map_err(EmployeeDirectoryError::persistence)?;
            row.map(row_to_employee).transpose()
        })
        .await
    }

    async fn find_active_by_id(
        &self,
        id: EmployeeId,
    ) -> EmployeeDirectoryResult<Option<Employee>> {
        self.run_blocking(move |connection| {
            let row = employees::table
                .filter(employees::id.eq(id.into_inner()))
                .filter(employees::deleted.eq(false))
                .select(EmployeeRow::as_select())
                .first::<EmployeeRow>(connection)
                .optional()
                .map_err(EmployeeDirectoryError::persistence)?;
            row.map(row_to_employee).transpose()
        })
        .await
    }
}

fn row_to_employee(row: EmployeeRow) -> EmployeeDirectoryResult<Employee> {
    let EmployeeRow {
        id,
        first_name,
        last_name,
        email: persisted_email,
        role: persisted_role,
        deleted,
    } = row;

    let email = EmailAddress::new(persisted_email).map_err(EmployeeDirectoryError::persistence)?;
    let role =
        Role::try_from(persisted_role.as_str()).map_err(EmployeeDirectoryError::persistence)?;

    Ok(Employee::from_persisted(
        EmployeeId::from_uuid(id),
        first_name,
        last_name,
        email,
        role,
        deleted,
    ))
}
