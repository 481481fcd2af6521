use thiserror::Error;

use crate::store::StoreError;
use crate::workflow::PublishStep;

/// Unified error type for version-publisher operations
#[derive(Error, Debug)]
pub enum PublisherError {
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Publishing failed while trying to {step}: {source}")]
    PublishFailed {
        step: PublishStep,
        #[source]
        source: StoreError,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in version-publisher
pub type Result<T> = std::result::Result<T, PublisherError>;

impl PublisherError {
    /// Create an invalid version error with context
    pub fn invalid_version(msg: impl Into<String>) -> Self {
        PublisherError::InvalidVersion(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        PublisherError::Config(msg.into())
    }

    /// Wrap a store failure with the workflow step it interrupted
    pub fn publish_failed(step: PublishStep, source: StoreError) -> Self {
        PublisherError::PublishFailed { step, source }
    }

    /// The store failure behind a `PublishFailed`, if any
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            PublisherError::PublishFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}
