use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A version entry as the tracker stores it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// Opaque reference the tracker uses to address this record
    pub self_ref: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub released: bool,
    #[serde(default)]
    pub archived: bool,
}

/// Field set sent to the tracker when updating or creating a version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInput {
    pub project_key: String,
    pub name: String,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub archived: bool,
    pub released: bool,
}

impl VersionInput {
    /// Mark an existing record released on `date`, keeping its name and description
    pub fn release(project_key: impl Into<String>, record: &VersionRecord, date: NaiveDate) -> Self {
        VersionInput {
            project_key: project_key.into(),
            name: record.name.clone(),
            description: record.description.clone(),
            release_date: Some(date),
            archived: false,
            released: true,
        }
    }

    /// A fresh, unreleased version without description or date
    pub fn unreleased(project_key: impl Into<String>, name: impl Into<String>) -> Self {
        VersionInput {
            project_key: project_key.into(),
            name: name.into(),
            description: None,
            release_date: None,
            archived: false,
            released: false,
        }
    }
}
