#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use relkit::config::{ConfigFile, RawConfigFile, VariantConfig};
use relkit::context::BuildContext;
use relkit::exec::CommandRunner;
use relkit::fs::FileSystem;
use relkit::properties::PropertySource;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn with_host_task(mut self, name: &str) -> Self {
        self.config.host.tasks.push(name.to_string());
        self
    }

    pub fn with_property(mut self, key: &str, value: &str) -> Self {
        self.config
            .properties
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_build_constant(mut self, key: &str, value: &str) -> Self {
        self.config
            .build_config
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_variant(mut self, variant: VariantConfig) -> Self {
        self.config.variants.push(variant);
        self
    }

    pub fn with_tag_prefix(mut self, prefix: &str) -> Self {
        self.config.config.tag_prefix = prefix.to_string();
        self
    }

    pub fn with_generic_changelog_since(mut self, since: &str) -> Self {
        self.config.config.generic_changelog_since = Some(since.to_string());
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `[[variant]]` entry with explicit version values.
pub fn variant(flavor: &str, build_type: &str, version_name: &str, version_code: u64) -> VariantConfig {
    VariantConfig {
        flavor: flavor.to_string(),
        build_type: build_type.to_string(),
        version_name: Some(version_name.to_string()),
        version_code: Some(version_code),
        outputs: 1,
    }
}

/// Builder for `BuildContext` with an empty environment and no properties.
pub struct ContextBuilder {
    root: PathBuf,
    config: ConfigFile,
    flags: Vec<String>,
    env: BTreeMap<String, String>,
}

impl ContextBuilder {
    pub fn new(root: impl AsRef<Path>, config: ConfigFile) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config,
            flags: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    /// Same as `-P flag` on the command line.
    pub fn flag(mut self, flag: &str) -> Self {
        self.flags.push(flag.to_string());
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn build(self, fs: Arc<dyn FileSystem>, runner: Arc<dyn CommandRunner>) -> BuildContext {
        let properties = PropertySource::from_config_and_flags(&self.config.properties, &self.flags)
            .expect("invalid property flag in test");
        BuildContext::new(self.root, self.config, properties, fs, runner).with_env(self.env)
    }
}
