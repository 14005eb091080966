// src/context.rs

//! The explicit build context handed to every component.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::ConfigFile;
use crate::exec::{CommandRunner, Git};
use crate::fs::FileSystem;
use crate::properties::PropertySource;

/// Project root, configuration, build properties, a snapshot of the process
/// environment, and the filesystem/command services.
///
/// There is no global state: anything a task needs at configuration or
/// execution time is reachable from here.
#[derive(Debug, Clone)]
pub struct BuildContext {
    root: PathBuf,
    config: ConfigFile,
    properties: PropertySource,
    env: BTreeMap<String, String>,
    fs: Arc<dyn FileSystem>,
    runner: Arc<dyn CommandRunner>,
}

impl BuildContext {
    /// Build a context whose environment is the current process environment.
    pub fn new(
        root: impl Into<PathBuf>,
        config: ConfigFile,
        properties: PropertySource,
        fs: Arc<dyn FileSystem>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            root: root.into(),
            config,
            properties,
            env: std::env::vars().collect(),
            fs,
            runner,
        }
    }

    /// Replace the environment snapshot.
    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a path relative to the project root.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn properties(&self) -> &PropertySource {
        &self.properties
    }

    pub fn env_var(&self, name: &str) -> Option<&str> {
        self.env.get(name).map(|v| v.as_str())
    }

    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    pub fn git(&self) -> Git {
        Git::new(Arc::clone(&self.runner), &self.root)
    }

    /// Location of the version record.
    pub fn version_file(&self) -> PathBuf {
        self.resolve(&self.config.config.version_file)
    }

    /// Directory changelog artifacts are written to.
    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.config.config.output_dir)
    }
}
