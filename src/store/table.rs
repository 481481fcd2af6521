use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{VersionInput, VersionRecord};
use crate::store::{StoreError, StoreResult};

/// Per-project ordered version lists, the state behind the mock and file stores
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionTable {
    #[serde(default)]
    projects: BTreeMap<String, Vec<VersionRecord>>,
    #[serde(default)]
    last_id: u64,
}

impl VersionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record without any duplicate check, returning what was stored
    pub fn insert(
        &mut self,
        project_key: &str,
        name: impl Into<String>,
        released: bool,
    ) -> VersionRecord {
        let record = VersionRecord {
            self_ref: self.allocate_ref(project_key),
            name: name.into(),
            description: None,
            release_date: None,
            released,
            archived: false,
        };
        self.projects
            .entry(project_key.to_string())
            .or_default()
            .push(record.clone());
        record
    }

    /// Records of a project in order; unknown projects have none
    pub fn versions(&self, project_key: &str) -> Vec<VersionRecord> {
        self.projects.get(project_key).cloned().unwrap_or_default()
    }

    pub fn find(&self, self_ref: &str) -> Option<&VersionRecord> {
        self.projects
            .values()
            .flatten()
            .find(|record| record.self_ref == self_ref)
    }

    pub fn update(&mut self, self_ref: &str, input: &VersionInput) -> StoreResult<()> {
        let (project_key, index) = self.locate(self_ref)?;
        let versions = self.projects.get_mut(&project_key).ok_or_else(|| {
            StoreError::not_found(format!("project {} has no versions", project_key))
        })?;

        // Projects may already hold duplicate names; only a rename can conflict
        let renaming = versions[index].name != input.name;
        let duplicate = versions
            .iter()
            .enumerate()
            .any(|(i, record)| i != index && record.name == input.name);
        if renaming && duplicate {
            return Err(StoreError::conflict(format!(
                "project {} already has a version named {}",
                project_key, input.name
            )));
        }

        let record = &mut versions[index];
        record.name = input.name.clone();
        record.description = input.description.clone();
        record.release_date = input.release_date;
        record.released = input.released;
        record.archived = input.archived;
        Ok(())
    }

    pub fn create(&mut self, input: &VersionInput) -> StoreResult<VersionRecord> {
        let exists = self
            .projects
            .get(&input.project_key)
            .is_some_and(|versions| versions.iter().any(|record| record.name == input.name));
        if exists {
            return Err(StoreError::conflict(format!(
                "project {} already has a version named {}",
                input.project_key, input.name
            )));
        }

        let record = VersionRecord {
            self_ref: self.allocate_ref(&input.project_key),
            name: input.name.clone(),
            description: input.description.clone(),
            release_date: input.release_date,
            released: input.released,
            archived: input.archived,
        };
        self.projects
            .entry(input.project_key.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    pub fn reorder_after(&mut self, moved_ref: &str, after_ref: &str) -> StoreResult<()> {
        let (moved_project, moved_index) = self.locate(moved_ref)?;
        let (after_project, _) = self.locate(after_ref)?;
        if moved_project != after_project {
            return Err(StoreError::not_found(format!(
                "{} is not a version of project {}",
                after_ref, moved_project
            )));
        }
        if moved_ref == after_ref {
            return Ok(());
        }

        let versions = self.projects.get_mut(&moved_project).ok_or_else(|| {
            StoreError::not_found(format!("project {} has no versions", moved_project))
        })?;
        let moved = versions.remove(moved_index);
        let anchor = versions
            .iter()
            .position(|record| record.self_ref == after_ref)
            .ok_or_else(|| StoreError::not_found(after_ref.to_string()))?;
        versions.insert(anchor + 1, moved);
        Ok(())
    }

    fn locate(&self, self_ref: &str) -> StoreResult<(String, usize)> {
        self.projects
            .iter()
            .find_map(|(project_key, versions)| {
                versions
                    .iter()
                    .position(|record| record.self_ref == self_ref)
                    .map(|index| (project_key.clone(), index))
            })
            .ok_or_else(|| StoreError::not_found(format!("no version with reference {}", self_ref)))
    }

    fn allocate_ref(&mut self, project_key: &str) -> String {
        self.last_id += 1;
        format!("{}/{}", project_key, self.last_id)
    }
}
