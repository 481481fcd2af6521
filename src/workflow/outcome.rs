use std::fmt;

use crate::domain::VersionRecord;

/// States a single publish run moves through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishState {
    Start,
    KeyResolved,
    PolicyChecked,
    VersionLocated,
    Released,
    SuccessorCreated,
    /// Terminal success
    Reordered,
    /// Terminal skip: no project key
    NoKey,
    /// Terminal skip: artifact excluded by policy
    PolicySkipped,
    /// Terminal skip: tracker has no version with the release name
    NoMatch,
}

impl PublishState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PublishState::Reordered
                | PublishState::NoKey
                | PublishState::PolicySkipped
                | PublishState::NoMatch
        )
    }
}

/// How a publish run ended when no error was raised.
/// Skips are expected outcomes and leave the tracker untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The artifact has no tracker project key
    NoKey {
        artifact_id: String,
        release_version: String,
    },
    /// The artifact matches an excluded prefix
    PolicySkipped {
        artifact_id: String,
        prefix: String,
    },
    /// The project has no version named like the release
    NoMatch {
        project_key: String,
        release_version: String,
    },
    /// Version released, successor created and placed right after it
    Reordered {
        project_key: String,
        released: VersionRecord,
        successor: VersionRecord,
    },
}

impl PublishOutcome {
    pub fn state(&self) -> PublishState {
        match self {
            PublishOutcome::NoKey { .. } => PublishState::NoKey,
            PublishOutcome::PolicySkipped { .. } => PublishState::PolicySkipped,
            PublishOutcome::NoMatch { .. } => PublishState::NoMatch,
            PublishOutcome::Reordered { .. } => PublishState::Reordered,
        }
    }

    pub fn is_skip(&self) -> bool {
        !matches!(self, PublishOutcome::Reordered { .. })
    }

    /// Skips that need someone to fix the tracker by hand
    pub fn needs_manual_action(&self) -> bool {
        matches!(self, PublishOutcome::NoMatch { .. })
    }
}

impl fmt::Display for PublishOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishOutcome::NoKey {
                artifact_id,
                release_version,
            } => write!(
                f,
                "Cannot publish tracker version {} as artifact '{}' does not define a project key",
                release_version, artifact_id
            ),
            PublishOutcome::PolicySkipped {
                artifact_id,
                prefix,
            } => write!(
                f,
                "Tracker versions of artifact '{}' are not maintained (excluded prefix '{}')",
                artifact_id, prefix
            ),
            PublishOutcome::NoMatch {
                project_key,
                release_version,
            } => write!(
                f,
                "Project {} has no version named '{}'. Please update the tracker versions manually",
                project_key, release_version
            ),
            PublishOutcome::Reordered {
                project_key,
                released,
                successor,
            } => write!(
                f,
                "Released version {} and created {} for project {}",
                released.name, successor.name, project_key
            ),
        }
    }
}
