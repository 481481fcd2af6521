//! Domain logic - version identifiers and tracker version records

pub mod record;
pub mod version;

pub use record::{VersionInput, VersionRecord};
pub use version::VersionIdentifier;
