//! In-memory workflow store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::workflow::{
    domain::{Task, TaskId, WorkflowEntry},
    ports::{WorkflowStore, WorkflowStoreError, WorkflowStoreResult},
};

#[derive(Debug, Default)]
struct StoreState {
    tasks: HashMap<TaskId, Task>,
    history: HashMap<TaskId, Vec<WorkflowEntry>>,
}

/// Thread-safe in-memory workflow store.
///
/// Tasks and their audit entries live under one lock, so a transition
/// commit is atomic: each operation holds the lock for its full
/// read-modify-write span, which also serializes concurrent writes to the
/// same task. Entries are kept per task in append order, matching the
/// creation-order contract of the port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkflowStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryWorkflowStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkflowStore for InMemoryWorkflowStore {
    async fn store(&self, task: &Task) -> WorkflowStoreResult<()> {
        let mut state = self.state.write().map_err(|err| {
            WorkflowStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.tasks.contains_key(&task.id()) {
            return Err(WorkflowStoreError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> WorkflowStoreResult<Option<Task>> {
        let state = self.state.read().map_err(|err| {
            WorkflowStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn commit_transition(
        &self,
        task: &Task,
        entry: &WorkflowEntry,
    ) -> WorkflowStoreResult<()> {
        let mut state = self.state.write().map_err(|err| {
            WorkflowStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if !state.tasks.contains_key(&task.id()) {
            return Err(WorkflowStoreError::NotFound(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        state
            .history
            .entry(entry.task_id())
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    async fn find_history(&self, task_id: TaskId) -> WorkflowStoreResult<Vec<WorkflowEntry>> {
        let state = self.state.read().map_err(|err| {
            WorkflowStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.history.get(&task_id).cloned().unwrap_or_default())
    }

    async fn delete_history(&self, task_id: TaskId) -> WorkflowStoreResult<usize> {
        let mut state = self.state.write().map_err(|err| {
            WorkflowStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .history
            .remove(&task_id)
            .map_or(0, |removed| removed.len()))
    }
}
