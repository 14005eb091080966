// src/tasks/changelog.rs

use std::path::PathBuf;

use tracing::info;

use crate::context::BuildContext;
use crate::errors::Result;
use crate::properties::CHANGELOG_SINCE;
use crate::registry::TaskAction;

pub const PROJECT_CHANGELOG_FILE: &str = "changelog.txt";
pub const GENERIC_CHANGELOG_FILE: &str = "changelog-generic.txt";

/// Commits since the last release tag (whole history if there is none).
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateProjectChangeLog;

impl GenerateProjectChangeLog {
    pub fn generate(&self, ctx: &BuildContext) -> Result<PathBuf> {
        let git = ctx.git();
        let last_tag = git.last_tag()?;
        let range = last_tag.as_ref().map(|tag| format!("{tag}..HEAD"));

        let header = match &last_tag {
            Some(tag) => format!("Changes since {tag}"),
            None => "All changes".to_string(),
        };
        let log = git.log(range.as_deref(), None)?;

        write_changelog(ctx, PROJECT_CHANGELOG_FILE, &header, &log)
    }
}

impl TaskAction for GenerateProjectChangeLog {
    fn execute(&self, ctx: &BuildContext) -> Result<()> {
        self.generate(ctx).map(|_| ())
    }
}

/// Commits since a given reference: the `changelogSince` property, else the
/// configured default, else the most recent `changelog_max_entries` commits.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateGenericChangeLog;

impl GenerateGenericChangeLog {
    pub fn generate(&self, ctx: &BuildContext) -> Result<PathBuf> {
        let since = ctx
            .properties()
            .get(CHANGELOG_SINCE)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .or_else(|| ctx.config().config.generic_changelog_since.clone());

        let git = ctx.git();
        let (header, log) = match since {
            Some(since) => {
                let range = format!("{since}..HEAD");
                (format!("Changes since {since}"), git.log(Some(range.as_str()), None)?)
            }
            None => {
                let max = ctx.config().config.changelog_max_entries;
                (
                    format!("Last {max} changes"),
                    git.log(None, Some(max))?,
                )
            }
        };

        write_changelog(ctx, GENERIC_CHANGELOG_FILE, &header, &log)
    }
}

impl TaskAction for GenerateGenericChangeLog {
    fn execute(&self, ctx: &BuildContext) -> Result<()> {
        self.generate(ctx).map(|_| ())
    }
}

fn write_changelog(ctx: &BuildContext, file: &str, header: &str, log: &str) -> Result<PathBuf> {
    let path = ctx.output_dir().join(file);

    let mut contents = format!("{header}\n\n");
    for line in log.lines().filter(|l| !l.trim().is_empty()) {
        contents.push_str(line);
        contents.push('\n');
    }

    ctx.fs().write(&path, contents.as_bytes())?;
    info!(path = ?path, "changelog written");
    Ok(path)
}
