// src/tasks/bump.rs

use tracing::info;

use crate::context::BuildContext;
use crate::errors::Result;
use crate::registry::TaskAction;
use crate::version::{VersionField, VersionRecord};

/// Adds one to a single field of the version record.
#[derive(Debug, Clone, Copy)]
pub struct IncreaseVersion {
    pub field: VersionField,
}

impl IncreaseVersion {
    pub fn new(field: VersionField) -> Self {
        Self { field }
    }
}

impl TaskAction for IncreaseVersion {
    fn execute(&self, ctx: &BuildContext) -> Result<()> {
        let record = VersionRecord::increment_file(ctx.fs(), &ctx.version_file(), self.field)?;
        info!(field = self.field.key(), version = %record, "version increased");
        Ok(())
    }
}
