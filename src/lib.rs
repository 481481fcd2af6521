pub mod config;
pub mod domain;
pub mod error;
pub mod project_key;
pub mod store;
pub mod ui;
pub mod workflow;

pub use domain::VersionIdentifier;
pub use error::{PublisherError, Result};
pub use workflow::{publish, PublishOutcome, PublishPolicy, PublishRequest};
