// src/tasks/tagging.rs

use crate::context::BuildContext;
use crate::errors::Result;
use crate::registry::TaskAction;
use crate::version::VersionRecord;

/// Tags HEAD with the current version. Never retried: an existing tag of
/// the same name fails the task.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagProject;

impl TagProject {
    pub fn tag_name(ctx: &BuildContext, record: &VersionRecord) -> String {
        format!("{}{}", ctx.config().config.tag_prefix, record.version_name())
    }

    pub fn tag(&self, ctx: &BuildContext) -> Result<String> {
        let record = VersionRecord::read(ctx.fs(), &ctx.version_file())?;
        let tag = Self::tag_name(ctx, &record);
        ctx.git().create_tag(&tag, &format!("Release {tag}"))?;
        Ok(tag)
    }
}

impl TaskAction for TagProject {
    fn execute(&self, ctx: &BuildContext) -> Result<()> {
        self.tag(ctx).map(|_| ())
    }
}
