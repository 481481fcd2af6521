use std::sync::{Mutex, PoisonError};

use tracing::info;

use crate::domain::{VersionInput, VersionRecord};
use crate::store::{StoreCall, StoreResult, VersionStore};

/// Reads from the wrapped store but only records mutations
pub struct DryRunStore<S> {
    inner: S,
    planned: Mutex<Vec<StoreCall>>,
}

impl<S: VersionStore> DryRunStore<S> {
    pub fn new(inner: S) -> Self {
        DryRunStore {
            inner,
            planned: Mutex::new(Vec::new()),
        }
    }

    /// Mutations that would have been sent, in order
    pub fn planned(&self) -> Vec<StoreCall> {
        self.planned
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    fn plan(&self, call: StoreCall) {
        info!(operation = %call, "dry run, not applied");
        self.planned
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl<S: VersionStore> VersionStore for DryRunStore<S> {
    fn list_versions(&self, project_key: &str) -> StoreResult<Vec<VersionRecord>> {
        self.inner.list_versions(project_key)
    }

    fn update_version(&self, self_ref: &str, input: &VersionInput) -> StoreResult<()> {
        self.plan(StoreCall::Update {
            self_ref: self_ref.to_string(),
            input: input.clone(),
        });
        Ok(())
    }

    fn create_version(&self, input: &VersionInput) -> StoreResult<VersionRecord> {
        self.plan(StoreCall::Create {
            input: input.clone(),
        });
        Ok(VersionRecord {
            self_ref: format!("dry-run/{}", input.name),
            name: input.name.clone(),
            description: input.description.clone(),
            release_date: input.release_date,
            released: input.released,
            archived: input.archived,
        })
    }

    fn reorder_after(&self, moved_ref: &str, after_ref: &str) -> StoreResult<()> {
        self.plan(StoreCall::ReorderAfter {
            moved_ref: moved_ref.to_string(),
            after_ref: after_ref.to_string(),
        });
        Ok(())
    }
}
