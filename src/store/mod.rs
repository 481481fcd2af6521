//! Tracker version store abstraction layer
//!
//! The publish workflow never talks to an issue tracker directly. It goes
//! through the [VersionStore] trait, which exposes the tracker's version
//! records for a project plus the three mutations the workflow needs.
//!
//! # Implementations
//!
//! - [file::FileVersionStore]: JSON document on disk, used by the binary
//! - [mock::MockVersionStore]: in-memory store with a call log and failure injection
//! - [dry_run::DryRunStore]: wraps another store and only records mutations
//!
//! ```rust
//! # use version_publisher::store::{VersionStore, StoreResult};
//! # fn example<S: VersionStore>(store: &S) -> StoreResult<()> {
//! for record in store.list_versions("ABC")? {
//!     println!("{} released={}", record.name, record.released);
//! }
//! # Ok(())
//! # }
//! ```

pub mod dry_run;
pub mod file;
pub mod mock;
pub mod table;

pub use dry_run::DryRunStore;
pub use file::FileVersionStore;
pub use mock::MockVersionStore;
pub use table::VersionTable;

use std::fmt;

use thiserror::Error;

use crate::domain::{VersionInput, VersionRecord};

/// Failures reported by a version store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Version store unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Version not found: {0}")]
    NotFound(String),

    #[error("Version conflict: {0}")]
    Conflict(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        StoreError::RemoteUnavailable(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        StoreError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        StoreError::Conflict(msg.into())
    }
}

/// Read/write view of a tracker's version records
///
/// ## Thread Safety
///
/// Implementors must be `Send + Sync`. The workflow itself is single threaded
/// and issues one call at a time.
///
/// ## Error Handling
///
/// Implementations map their transport failures to [StoreError]. No method is
/// retried by the caller.
pub trait VersionStore: Send + Sync {
    /// All version records of a project, in the tracker's order
    fn list_versions(&self, project_key: &str) -> StoreResult<Vec<VersionRecord>>;

    /// Overwrite the fields of an existing record
    fn update_version(&self, self_ref: &str, input: &VersionInput) -> StoreResult<()>;

    /// Create a new record at the end of the project's version list
    fn create_version(&self, input: &VersionInput) -> StoreResult<VersionRecord>;

    /// Move `moved_ref` so that it sits directly after `after_ref`
    fn reorder_after(&self, moved_ref: &str, after_ref: &str) -> StoreResult<()>;
}

/// Kind of store operation, used for failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    List,
    Update,
    Create,
    Reorder,
}

/// A single call made against a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    List {
        project_key: String,
    },
    Update {
        self_ref: String,
        input: VersionInput,
    },
    Create {
        input: VersionInput,
    },
    ReorderAfter {
        moved_ref: String,
        after_ref: String,
    },
}

impl StoreCall {
    pub fn operation(&self) -> StoreOperation {
        match self {
            StoreCall::List { .. } => StoreOperation::List,
            StoreCall::Update { .. } => StoreOperation::Update,
            StoreCall::Create { .. } => StoreOperation::Create,
            StoreCall::ReorderAfter { .. } => StoreOperation::Reorder,
        }
    }

    /// True for calls that change tracker state
    pub fn is_mutation(&self) -> bool {
        !matches!(self, StoreCall::List { .. })
    }
}

impl fmt::Display for StoreCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreCall::List { project_key } => {
                write!(f, "list versions of project {}", project_key)
            }
            StoreCall::Update { self_ref, input } => {
                write!(f, "update {} ({})", input.name, self_ref)?;
                if input.released {
                    write!(f, " as released")?;
                }
                if let Some(date) = input.release_date {
                    write!(f, " on {}", date)?;
                }
                Ok(())
            }
            StoreCall::Create { input } => {
                write!(f, "create version {} in project {}", input.name, input.project_key)
            }
            StoreCall::ReorderAfter {
                moved_ref,
                after_ref,
            } => write!(f, "move {} after {}", moved_ref, after_ref),
        }
    }
}
