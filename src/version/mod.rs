// src/version/mod.rs

//! Application version: the persisted major/minor/build record, the
//! version-code timestamp, and the named accessors the build reads them
//! through.

pub mod extensions;
pub mod record;
pub mod timestamp;

pub use extensions::{BuildExtensions, ExtensionValue};
pub use record::{VersionField, VersionRecord};
pub use timestamp::{version_code_at, version_code_timestamp};
