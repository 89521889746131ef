//! In-memory employee directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::workflow::{
    domain::{EmailAddress, Employee, EmployeeId},
    ports::{EmployeeDirectory, EmployeeDirectoryError, EmployeeDirectoryResult},
};

/// Thread-safe in-memory employee directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEmployeeDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    employees: HashMap<EmployeeId, Employee>,
    email_index: HashMap<EmailAddress, EmployeeId>,
}

impl InMemoryEmployeeDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeDirectory for InMemoryEmployeeDirectory {
    async fn store(&self, employee: &Employee) -> EmployeeDirectoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            EmployeeDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.employees.contains_key(&employee.id())
            || state.email_index.contains_key(employee.email())
        {
            return Err(EmployeeDirectoryError::DuplicateEmployee(employee.id()));
        }
        state
            .email_index
            .insert(employee.email().clone(), employee.id());
        state.employees.insert(employee.id(), employee.clone());
        Ok(())
    }

    async fn find_active_by_email(
        &self,
        email: &EmailAddress,
    ) -> EmployeeDirectoryResult<Option<Employee>> {
        let state = self.state.read().map_err(|err| {
            EmployeeDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let employee = state
            .email_index
            .get(email)
            .and_then(|id| state.employees.get(id))
            .filter(|employee| !employee.is_deleted())
            .cloned();
        Ok(employee)
    }

    async fn find_active_by_id(
        &self,
        id: EmployeeId,
    ) -> EmployeeDirectoryResult<Option<Employee>> {
        let state = self.state.read().map_err(|err| {
            EmployeeDirectoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let employee = state
            .employees
            .get(&id)
            .filter(|employee| !employee.is_deleted())
            .cloned();
        Ok(employee)
    }
}
