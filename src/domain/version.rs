use crate::error::{PublisherError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const SNAPSHOT: &str = "SNAPSHOT";

/// Dotted release version (`major.minor.service[-qualifier]`).
///
/// Ordering only looks at the numeric triple, see [`VersionIdentifier::compare_version`].
/// Full equality and hashing also include the qualifier, so `1.2.3-RC1` and
/// `1.2.3` are version-equal but not `==`. For that reason the type does not
/// implement `Ord`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionIdentifier {
    major: u32,
    minor: u32,
    service: u32,
    qualifier: Option<String>,
}

impl VersionIdentifier {
    /// Create a final (unqualified) version
    pub fn new(major: u32, minor: u32, service: u32) -> Self {
        VersionIdentifier {
            major,
            minor,
            service,
            qualifier: None,
        }
    }

    /// Create a version from signed components, rejecting negative or oversized values
    pub fn try_new(major: i64, minor: i64, service: i64) -> Result<Self> {
        Ok(VersionIdentifier::new(
            component("major", major)?,
            component("minor", minor)?,
            component("service", service)?,
        ))
    }

    /// Attach a qualifier. An empty qualifier means no qualifier.
    ///
    /// The qualifier is stored as given. One containing `.` renders to a string
    /// that [`VersionIdentifier::parse`] rejects, since parsing only takes the
    /// qualifier from the last dotted segment (`1.2.3-a.b` does not round-trip).
    pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        let qualifier = qualifier.into();
        self.qualifier = if qualifier.is_empty() {
            None
        } else {
            Some(qualifier)
        };
        self
    }

    /// Parse a version string such as `2`, `2.5`, `1.2.3` or `1.2.3-SNAPSHOT`.
    ///
    /// The last dotted segment is split on its first `-`; everything after it
    /// becomes the qualifier. Missing minor/service default to 0 and segments
    /// past the third are ignored.
    pub fn parse(version: &str) -> Result<Self> {
        if version.trim().is_empty() {
            return Err(PublisherError::invalid_version(format!(
                "'{}' is blank",
                version
            )));
        }

        let mut segments: Vec<&str> = version.split('.').collect();
        let mut qualifier = None;
        if let Some(last) = segments.last_mut() {
            if let Some((number, suffix)) = last.split_once('-') {
                *last = number;
                qualifier = Some(suffix);
            }
        }

        let segment = |index: usize, name: &str| -> Result<u32> {
            match segments.get(index) {
                Some(raw) => raw.parse::<u32>().map_err(|_| {
                    PublisherError::invalid_version(format!(
                        "'{}' has an invalid {} component '{}'",
                        version, name, raw
                    ))
                }),
                None => Ok(0),
            }
        };

        let parsed = VersionIdentifier::new(
            segment(0, "major")?,
            segment(1, "minor")?,
            segment(2, "service")?,
        );

        Ok(match qualifier {
            Some(q) => parsed.with_qualifier(q),
            None => parsed,
        })
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn service(&self) -> u32 {
        self.service
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    /// True when the qualifier is `SNAPSHOT`, ignoring case
    pub fn is_snapshot(&self) -> bool {
        self.qualifier
            .as_deref()
            .is_some_and(|q| q.eq_ignore_ascii_case(SNAPSHOT))
    }

    /// Three-way comparison over (major, minor, service); the qualifier is ignored
    pub fn compare_version(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.service).cmp(&(other.major, other.minor, other.service))
    }

    pub fn is_version_equal(&self, other: &Self) -> bool {
        self.compare_version(other) == Ordering::Equal
    }

    pub fn is_version_less_than(&self, other: &Self) -> bool {
        self.compare_version(other) == Ordering::Less
    }

    pub fn is_version_less_than_or_equal(&self, other: &Self) -> bool {
        self.compare_version(other) != Ordering::Greater
    }

    pub fn is_version_greater_than(&self, other: &Self) -> bool {
        self.compare_version(other) == Ordering::Greater
    }

    pub fn is_version_greater_than_or_equal(&self, other: &Self) -> bool {
        self.compare_version(other) != Ordering::Less
    }

    /// The next service version: same major/minor, service + 1, qualifier dropped
    pub fn next_service_version(&self) -> Result<Self> {
        let service = self.service.checked_add(1).ok_or_else(|| {
            PublisherError::invalid_version(format!(
                "service component of '{}' cannot be incremented",
                self
            ))
        })?;
        Ok(VersionIdentifier::new(self.major, self.minor, service))
    }

    pub fn to_string_without_qualifier(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.service)
    }
}

fn component(name: &str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        PublisherError::invalid_version(format!(
            "{} component must be a non-negative 32-bit number, got {}",
            name, value
        ))
    })
}

impl FromStr for VersionIdentifier {
    type Err = PublisherError;

    fn from_str(s: &str) -> Result<Self> {
        VersionIdentifier::parse(s)
    }
}

impl fmt::Display for VersionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.service)?;
        if let Some(qualifier) = &self.qualifier {
            write!(f, "-{}", qualifier)?;
        }
        Ok(())
    }
}
