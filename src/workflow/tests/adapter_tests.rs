//! Unit tests for the in-memory adapters.

use crate::workflow::{
    adapters::memory::{InMemoryEmployeeDirectory, InMemoryWorkflowStore},
    domain::{
        EmailAddress, Employee, EmployeeId, Role, Task, TaskPriority, TaskStatus, WorkflowEntry,
    },
    ports::{EmployeeDirectory, EmployeeDirectoryError, WorkflowStore, WorkflowStoreError},
};
use mockable::DefaultClock;
use rstest::rstest;

fn sample_task(assignee: EmployeeId) -> Task {
    Task::new(
        "Review access requests",
        "Check the pending queue",
        TaskPriority::Low,
        assignee,
        &DefaultClock,
    )
    .expect("valid task")
}

fn sample_employee(email: &str, role: Role) -> Employee {
    let address = EmailAddress::new(email).expect("valid email");
    Employee::new("Sam", "Example", address, role)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_rejects_duplicate_task_ids() {
    let store = InMemoryWorkflowStore::new();
    let task = sample_task(EmployeeId::new());

    store.store(&task).await.expect("first store succeeds");
    let result = store.store(&task).await;

    assert!(matches!(
        result,
        Err(WorkflowStoreError::DuplicateTask(id)) if id == task.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn commit_requires_an_existing_task() {
    let store = InMemoryWorkflowStore::new();
    let clock = DefaultClock;
    let task = sample_task(EmployeeId::new());
    let entry = WorkflowEntry::new(task.id(), TaskStatus::InProgress, EmployeeId::new(), &clock);

    let result = store.commit_transition(&task, &entry).await;

    assert!(matches!(result, Err(WorkflowStoreError::NotFound(_))));
    // The rejected commit must not leave an entry behind.
    let entries = store.find_history(task.id()).await.expect("lookup succeeds");
    assert!(entries.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn commit_persists_the_task_and_its_entry_together() {
    let store = InMemoryWorkflowStore::new();
    let clock = DefaultClock;
    let updated_by = EmployeeId::new();
    let mut task = sample_task(EmployeeId::new());
    store.store(&task).await.expect("store succeeds");

    task.apply_status(TaskStatus::InProgress, &clock)
        .expect("legal transition");
    let entry = WorkflowEntry::new(task.id(), TaskStatus::InProgress, updated_by, &clock);
    store
        .commit_transition(&task, &entry)
        .await
        .expect("commit succeeds");

    let found = store
        .find_by_id(task.id())
        .await
        .expect("lookup succeeds")
        .expect("task exists");
    assert_eq!(found.status(), TaskStatus::InProgress);
    let entries = store.find_history(task.id()).await.expect("lookup succeeds");
    assert_eq!(entries.len(), 1);
    assert_eq!(
        entries.first().map(|entry| entry.updated_by()),
        Some(updated_by)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn directory_lookup_skips_soft_deleted_employees() {
    let directory = InMemoryEmployeeDirectory::new();
    let mut employee = sample_employee("kim@example.com", Role::Employee);
    employee.mark_deleted();
    directory.store(&employee).await.expect("store succeeds");

    let by_email = directory
        .find_active_by_email(employee.email())
        .await
        .expect("lookup succeeds");
    let by_id = directory
        .find_active_by_id(employee.id())
        .await
        .expect("lookup succeeds");

    assert!(by_email.is_none());
    assert!(by_id.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn directory_rejects_reused_email_addresses() {
    let directory = InMemoryEmployeeDirectory::new();
    let first = sample_employee("shared@example.com", Role::Employee);
    let second = sample_employee("shared@example.com", Role::HeadManager);
    directory.store(&first).await.expect("store succeeds");

    let result = directory.store(&second).await;

    assert!(matches!(
        result,
        Err(EmployeeDirectoryError::DuplicateEmployee(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn history_preserves_commit_order() {
    let store = InMemoryWorkflowStore::new();
    let clock = DefaultClock;
    let updated_by = EmployeeId::new();
    let mut task = sample_task(EmployeeId::new());
    store.store(&task).await.expect("store succeeds");

    for status in [
        TaskStatus::InProgress,
        TaskStatus::Resolved,
        TaskStatus::Done,
    ] {
        task.apply_status(status, &clock).expect("legal transition");
        let entry = WorkflowEntry::new(task.id(), status, updated_by, &clock);
        store
            .commit_transition(&task, &entry)
            .await
            .expect("commit succeeds");
    }

    let entries = store.find_history(task.id()).await.expect("lookup succeeds");
    let statuses: Vec<_> = entries.iter().map(|entry| entry.status()).collect();
    assert_eq!(
        statuses,
        vec![TaskStatus::InProgress, TaskStatus::Resolved, TaskStatus::Done]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn history_purge_removes_only_the_targeted_task() {
    let store = InMemoryWorkflowStore::new();
    let clock = DefaultClock;
    let updated_by = EmployeeId::new();
    let mut purged_task = sample_task(EmployeeId::new());
    let mut kept_task = sample_task(EmployeeId::new());
    store.store(&purged_task).await.expect("store succeeds");
    store.store(&kept_task).await.expect("store succeeds");

    for status in [TaskStatus::InProgress, TaskStatus::Resolved] {
        purged_task
            .apply_status(status, &clock)
            .expect("legal transition");
        let entry = WorkflowEntry::new(purged_task.id(), status, updated_by, &clock);
        store
            .commit_transition(&purged_task, &entry)
            .await
            .expect("commit succeeds");
    }
    kept_task
        .apply_status(TaskStatus::InProgress, &clock)
        .expect("legal transition");
    let kept_entry =
        WorkflowEntry::new(kept_task.id(), TaskStatus::InProgress, updated_by, &clock);
    store
        .commit_transition(&kept_task, &kept_entry)
        .await
        .expect("commit succeeds");

    let removed = store
        .delete_history(purged_task.id())
        .await
        .expect("purge succeeds");

    assert_eq!(removed, 2);
    let purged = store
        .find_history(purged_task.id())
        .await
        .expect("lookup succeeds");
    let kept = store
        .find_history(kept_task.id())
        .await
        .expect("lookup succeeds");
    assert!(purged.is_empty());
    assert_eq!(kept.len(), 1);
}
