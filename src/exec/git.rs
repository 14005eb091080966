// src/exec/git.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::command::{CommandOutput, CommandRunner, CommandSpec};

/// Line format used for changelog entries.
pub const CHANGELOG_FORMAT: &str = "--pretty=format:- %s (%h)";

/// The git operations relkit relies on, run through a [`CommandRunner`].
#[derive(Debug, Clone)]
pub struct Git {
    runner: Arc<dyn CommandRunner>,
    workdir: PathBuf,
}

impl Git {
    pub fn new(runner: Arc<dyn CommandRunner>, workdir: &Path) -> Self {
        Self {
            runner,
            workdir: workdir.to_path_buf(),
        }
    }

    fn spec(&self, args: &[&str]) -> CommandSpec {
        CommandSpec::new("git", args.iter().copied(), &self.workdir)
    }

    /// Run git and fail on a non-zero exit.
    fn run_checked(&self, args: &[&str]) -> Result<CommandOutput> {
        let spec = self.spec(args);
        self.runner.run(&spec)?.into_checked(&spec)
    }

    /// `git status --porcelain`; empty output means a clean working tree.
    pub fn status_porcelain(&self) -> Result<String> {
        Ok(self.run_checked(&["status", "--porcelain"])?.stdout)
    }

    /// Most recent tag reachable from HEAD, or `None` if there is none.
    pub fn last_tag(&self) -> Result<Option<String>> {
        let spec = self.spec(&["describe", "--tags", "--abbrev=0"]);
        let output = self.runner.run(&spec)?;

        if !output.success() {
            debug!(stderr = %output.stderr.trim(), "no tag reachable from HEAD");
            return Ok(None);
        }

        let tag = output.stdout.trim();
        Ok(if tag.is_empty() {
            None
        } else {
            Some(tag.to_string())
        })
    }

    /// One changelog line per commit in `range` (e.g. `v1.0.0..HEAD`), or in
    /// the whole history when `range` is `None`.
    pub fn log(&self, range: Option<&str>, max_entries: Option<usize>) -> Result<String> {
        let limit = max_entries.map(|n| format!("--max-count={n}"));

        let mut args = vec!["log", "--no-merges", CHANGELOG_FORMAT];
        if let Some(limit) = limit.as_deref() {
            args.push(limit);
        }
        args.push(range.unwrap_or("HEAD"));

        Ok(self.run_checked(&args)?.stdout)
    }

    /// Create an annotated tag. An existing tag of the same name is an error.
    pub fn create_tag(&self, name: &str, message: &str) -> Result<()> {
        self.run_checked(&["tag", "-a", name, "-m", message])?;
        info!(tag = %name, "created git tag");
        Ok(())
    }
}
