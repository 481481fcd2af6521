//! Release publish workflow
//!
//! Turns "version X was just released" into tracker updates:
//! 1. Resolve the project key (empty key: skip)
//! 2. Check the artifact against the exclusion policy
//! 3. Find the tracker version named exactly like the release
//! 4. Mark it released with today's date
//! 5. Create the next service version, unreleased
//! 6. Move that new version right after the released one
//!
//! Steps 4-6 are independent tracker calls. A failure aborts the remaining
//! steps and nothing already applied is rolled back.

pub mod outcome;

pub use outcome::{PublishOutcome, PublishState};

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Local, NaiveDate};
use tracing::{debug, error, info};

use crate::domain::{VersionIdentifier, VersionInput, VersionRecord};
use crate::error::{PublisherError, Result};
use crate::store::VersionStore;

/// Inputs of a single publish run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    /// Tracker project key, empty when the artifact has none
    pub project_key: String,
    /// Version string of the release being cut
    pub release_version: String,
    /// Artifact identifier checked against the exclusion policy
    pub artifact_id: String,
    /// Date stored on the released version
    pub release_date: NaiveDate,
}

impl PublishRequest {
    /// Create a request dated today
    pub fn new(
        project_key: impl Into<String>,
        release_version: impl Into<String>,
        artifact_id: impl Into<String>,
    ) -> Self {
        PublishRequest {
            project_key: project_key.into(),
            release_version: release_version.into(),
            artifact_id: artifact_id.into(),
            release_date: Local::now().date_naive(),
        }
    }

    pub fn with_release_date(mut self, release_date: NaiveDate) -> Self {
        self.release_date = release_date;
        self
    }
}

/// Which artifacts get their tracker versions maintained
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishPolicy {
    pub excluded_artifact_prefixes: BTreeSet<String>,
}

impl PublishPolicy {
    pub fn excluding<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PublishPolicy {
            excluded_artifact_prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// The first excluded prefix the artifact starts with
    pub fn excluded_by(&self, artifact_id: &str) -> Option<&str> {
        self.excluded_artifact_prefixes
            .iter()
            .find(|prefix| artifact_id.starts_with(prefix.as_str()))
            .map(String::as_str)
    }

    pub fn maintains(&self, artifact_id: &str) -> bool {
        self.excluded_by(artifact_id).is_none()
    }
}

/// Tracker call a publish run was performing when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStep {
    Locate,
    Release,
    CreateSuccessor,
    Reorder,
}

impl fmt::Display for PublishStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            PublishStep::Locate => "list the project versions",
            PublishStep::Release => "mark the version released",
            PublishStep::CreateSuccessor => "create the successor version",
            PublishStep::Reorder => "move the successor after the released version",
        };
        f.write_str(action)
    }
}

/// Name of the version created after `release_version` is published
pub fn successor_version_name(release_version: &str) -> Result<String> {
    let released = VersionIdentifier::parse(release_version)?;
    Ok(released.next_service_version()?.to_string_without_qualifier())
}

/// Run the publish workflow for one release.
///
/// Skips come back as `Ok` outcomes. Store failures come back as
/// [`PublisherError::PublishFailed`] naming the interrupted step.
pub fn publish<S: VersionStore + ?Sized>(
    request: &PublishRequest,
    policy: &PublishPolicy,
    store: &S,
) -> Result<PublishOutcome> {
    enter(PublishState::Start);

    let project_key = request.project_key.as_str();
    if project_key.is_empty() {
        let outcome = PublishOutcome::NoKey {
            artifact_id: request.artifact_id.clone(),
            release_version: request.release_version.clone(),
        };
        info!("{}", outcome);
        return Ok(outcome);
    }
    enter(PublishState::KeyResolved);

    if let Some(prefix) = policy.excluded_by(&request.artifact_id) {
        let outcome = PublishOutcome::PolicySkipped {
            artifact_id: request.artifact_id.clone(),
            prefix: prefix.to_string(),
        };
        info!("{}", outcome);
        return Ok(outcome);
    }
    enter(PublishState::PolicyChecked);

    let versions = store
        .list_versions(project_key)
        .map_err(|e| PublisherError::publish_failed(PublishStep::Locate, e))?;

    // Names are opaque here, no version parsing
    let Some(located) = versions
        .into_iter()
        .find(|record| record.name == request.release_version)
    else {
        let outcome = PublishOutcome::NoMatch {
            project_key: project_key.to_string(),
            release_version: request.release_version.clone(),
        };
        error!("{}", outcome);
        return Ok(outcome);
    };
    enter(PublishState::VersionLocated);

    // Fail on an unparsable release version before touching the tracker
    let successor_name = successor_version_name(&request.release_version)?;

    let release = VersionInput::release(project_key, &located, request.release_date);
    store
        .update_version(&located.self_ref, &release)
        .map_err(|e| PublisherError::publish_failed(PublishStep::Release, e))?;
    info!(
        "Version published {} for project {}",
        located.name, project_key
    );
    enter(PublishState::Released);

    let successor = store
        .create_version(&VersionInput::unreleased(project_key, successor_name.as_str()))
        .map_err(|e| {
            error!(
                "Version {} is already released but {} could not be created; \
                 create it in project {} manually",
                located.name, successor_name, project_key
            );
            PublisherError::publish_failed(PublishStep::CreateSuccessor, e)
        })?;
    info!(
        "New version created {} for project {}",
        successor.name, project_key
    );
    enter(PublishState::SuccessorCreated);

    store
        .reorder_after(&successor.self_ref, &located.self_ref)
        .map_err(|e| {
            error!(
                "Version {} was created but could not be moved after {}; \
                 reorder the versions of project {} manually",
                successor.name, located.name, project_key
            );
            PublisherError::publish_failed(PublishStep::Reorder, e)
        })?;
    enter(PublishState::Reordered);

    Ok(PublishOutcome::Reordered {
        project_key: project_key.to_string(),
        released: released_view(located, &release),
        successor,
    })
}

fn released_view(mut record: VersionRecord, input: &VersionInput) -> VersionRecord {
    record.release_date = input.release_date;
    record.released = input.released;
    record.archived = input.archived;
    record
}

fn enter(state: PublishState) {
    debug!(?state, "publish state");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MockVersionStore, StoreError, StoreOperation};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 14).unwrap()
    }

    fn request(project_key: &str, version: &str) -> PublishRequest {
        PublishRequest::new(project_key, version, "tools").with_release_date(date())
    }

    #[test]
    fn test_successor_version_name() {
        assert_eq!(successor_version_name("1.4.0").unwrap(), "1.4.1");
        assert_eq!(successor_version_name("2").unwrap(), "2.0.1");
        assert_eq!(successor_version_name("1.2.9-SNAPSHOT").unwrap(), "1.2.10");
        assert!(successor_version_name("").is_err());
    }

    #[test]
    fn test_policy_prefix_match() {
        let policy = PublishPolicy::excluding(["internal-", "test"]);
        assert_eq!(policy.excluded_by("internal-tools"), Some("internal-"));
        assert_eq!(policy.excluded_by("testing-kit"), Some("test"));
        assert!(policy.maintains("tools-internal"));
        assert!(PublishPolicy::default().maintains("anything"));
    }

    #[test]
    fn test_publish_happy_path_order_of_calls() {
        let mut store = MockVersionStore::new();
        store.add_version("ABC", "1.4.0", false);

        let outcome = publish(&request("ABC", "1.4.0"), &PublishPolicy::default(), &store).unwrap();
        assert_eq!(outcome.state(), PublishState::Reordered);

        let ops: Vec<StoreOperation> = store.calls().iter().map(|c| c.operation()).collect();
        assert_eq!(
            ops,
            vec![
                StoreOperation::List,
                StoreOperation::Update,
                StoreOperation::Create,
                StoreOperation::Reorder,
            ]
        );
    }

    #[test]
    fn test_publish_uses_first_exact_match() {
        let mut store = MockVersionStore::new();
        let first = store.add_version("ABC", "1.0.0", false);
        store.add_version("ABC", "1.0.0", false);

        let outcome = publish(&request("ABC", "1.0.0"), &PublishPolicy::default(), &store).unwrap();
        match outcome {
            PublishOutcome::Reordered { released, .. } => {
                assert_eq!(released.self_ref, first.self_ref)
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_publish_list_failure_is_wrapped() {
        let mut store = MockVersionStore::new();
        store.fail_on(StoreOperation::List, StoreError::unavailable("timeout"));

        let err = publish(&request("ABC", "1.0.0"), &PublishPolicy::default(), &store).unwrap_err();
        assert!(matches!(
            err,
            PublisherError::PublishFailed {
                step: PublishStep::Locate,
                ..
            }
        ));
    }

    #[test]
    fn test_unparsable_release_version_fails_before_mutation() {
        let mut store = MockVersionStore::new();
        store.add_version("ABC", "Sprint 5", false);

        let err = publish(&request("ABC", "Sprint 5"), &PublishPolicy::default(), &store).unwrap_err();
        assert!(matches!(err, PublisherError::InvalidVersion(_)));
        assert!(store.mutations().is_empty());
    }
}
