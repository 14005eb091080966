#![allow(dead_code)]

pub use relkit_test_utils::builders;
pub use relkit_test_utils::fake_runner::FakeCommandRunner;
pub use relkit_test_utils::init_tracing;

use std::sync::Arc;

use relkit::config::ConfigFile;
use relkit::fs::mock::MockFileSystem;
use relkit::project::Project;

use crate::common::builders::ContextBuilder;

pub const ROOT: &str = "/work/app";

/// In-memory project root plus the fakes backing it.
pub struct Harness {
    pub fs: MockFileSystem,
    pub git: FakeCommandRunner,
}

impl Harness {
    pub fn new() -> Self {
        init_tracing();
        Self {
            fs: MockFileSystem::new(),
            git: FakeCommandRunner::new(),
        }
    }

    pub fn with_version_file(self, contents: &str) -> Self {
        self.fs.add_file(format!("{ROOT}/version.properties"), contents);
        self
    }

    pub fn context(&self, config: ConfigFile) -> ContextBuilder {
        ContextBuilder::new(ROOT, config)
    }

    /// Configure a project the way the CLI does.
    pub fn configure(&self, ctx: ContextBuilder) -> relkit::errors::Result<Project> {
        let ctx = ctx.build(Arc::new(self.fs.clone()), Arc::new(self.git.clone()));
        relkit::configure(ctx)
    }
}
