// src/version/extensions.rs

use std::fmt;

use crate::context::BuildContext;
use crate::errors::{RelkitError, Result};
use crate::version::record::VersionRecord;
use crate::version::timestamp::version_code_timestamp;

pub const GET_VERSION_CODE_TIMESTAMP: &str = "getVersionCodeTimestamp";
pub const GET_VERSION_NAME_FROM_FILE: &str = "getVersionNameFromFile";

/// Value produced by a build extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionValue {
    Int(u64),
    Text(String),
}

impl fmt::Display for ExtensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionValue::Int(v) => write!(f, "{v}"),
            ExtensionValue::Text(v) => f.write_str(v),
        }
    }
}

/// The fixed set of computed values a build description can read.
///
/// Values are recomputed on every access.
#[derive(Debug, Clone, Copy)]
pub struct BuildExtensions<'a> {
    ctx: &'a BuildContext,
}

impl<'a> BuildExtensions<'a> {
    pub const NAMES: [&'static str; 2] = [GET_VERSION_CODE_TIMESTAMP, GET_VERSION_NAME_FROM_FILE];

    pub fn new(ctx: &'a BuildContext) -> Self {
        Self { ctx }
    }

    /// `getVersionCodeTimestamp`.
    pub fn version_code_timestamp(&self) -> u64 {
        version_code_timestamp(self.ctx.properties())
    }

    /// `getVersionNameFromFile`: `major.minor.build` from the version file.
    pub fn version_name_from_file(&self) -> Result<String> {
        let record = VersionRecord::read(self.ctx.fs(), &self.ctx.version_file())?;
        Ok(record.version_name())
    }

    /// Look an extension up by its build-script name.
    pub fn get(&self, name: &str) -> Result<ExtensionValue> {
        match name {
            GET_VERSION_CODE_TIMESTAMP => Ok(ExtensionValue::Int(self.version_code_timestamp())),
            GET_VERSION_NAME_FROM_FILE => Ok(ExtensionValue::Text(self.version_name_from_file()?)),
            other => Err(RelkitError::ConfigError(format!(
                "unknown build extension '{other}' (expected one of {:?})",
                Self::NAMES
            ))),
        }
    }
}
