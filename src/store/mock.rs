use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::{VersionInput, VersionRecord};
use crate::store::{StoreCall, StoreError, StoreOperation, StoreResult, VersionStore, VersionTable};

/// Mock store for testing without a real tracker
///
/// Records every call and can be told to fail a given operation.
pub struct MockVersionStore {
    state: Mutex<MockState>,
}

#[derive(Default)]
struct MockState {
    table: VersionTable,
    calls: Vec<StoreCall>,
    failures: HashMap<StoreOperation, StoreError>,
}

impl MockVersionStore {
    /// Create a new empty mock store
    pub fn new() -> Self {
        MockVersionStore {
            state: Mutex::new(MockState::default()),
        }
    }

    /// Create a mock store on top of an existing table
    pub fn with_table(table: VersionTable) -> Self {
        MockVersionStore {
            state: Mutex::new(MockState {
                table,
                ..MockState::default()
            }),
        }
    }

    /// Add a version to a project
    pub fn add_version(
        &mut self,
        project_key: &str,
        name: impl Into<String>,
        released: bool,
    ) -> VersionRecord {
        self.state_mut().table.insert(project_key, name, released)
    }

    /// Make every later call of `operation` fail with `error`
    pub fn fail_on(&mut self, operation: StoreOperation, error: StoreError) {
        self.state_mut().failures.insert(operation, error);
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Only the calls that change tracker state
    pub fn mutations(&self) -> Vec<StoreCall> {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.is_mutation())
            .cloned()
            .collect()
    }

    /// Current records of a project
    pub fn versions(&self, project_key: &str) -> Vec<VersionRecord> {
        self.lock().table.versions(project_key)
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&mut self) -> &mut MockState {
        self.state.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: StoreCall) -> MutexGuard<'_, MockState> {
        let mut state = self.lock();
        state.calls.push(call);
        state
    }
}

impl MockState {
    fn check(&self, operation: StoreOperation) -> StoreResult<()> {
        match self.failures.get(&operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl Default for MockVersionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionStore for MockVersionStore {
    fn list_versions(&self, project_key: &str) -> StoreResult<Vec<VersionRecord>> {
        let state = self.record(StoreCall::List {
            project_key: project_key.to_string(),
        });
        state.check(StoreOperation::List)?;
        Ok(state.table.versions(project_key))
    }

    fn update_version(&self, self_ref: &str, input: &VersionInput) -> StoreResult<()> {
        let mut state = self.record(StoreCall::Update {
            self_ref: self_ref.to_string(),
            input: input.clone(),
        });
        state.check(StoreOperation::Update)?;
        state.table.update(self_ref, input)
    }

    fn create_version(&self, input: &VersionInput) -> StoreResult<VersionRecord> {
        let mut state = self.record(StoreCall::Create {
            input: input.clone(),
        });
        state.check(StoreOperation::Create)?;
        state.table.create(input)
    }

    fn reorder_after(&self, moved_ref: &str, after_ref: &str) -> StoreResult<()> {
        let mut state = self.record(StoreCall::ReorderAfter {
            moved_ref: moved_ref.to_string(),
            after_ref: after_ref.to_string(),
        });
        state.check(StoreOperation::Reorder)?;
        state.table.reorder_after(moved_ref, after_ref)
    }
}
