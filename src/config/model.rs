// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// version_file = "version.properties"
/// tag_prefix = "v"
///
/// [properties]
/// devBuild = "true"
///
/// [build_config]
/// API_URL = "https://api.example.com"
///
/// [host]
/// tasks = ["generateFreeReleaseBuildConfig", "preDevReleaseBuild"]
///
/// [[variant]]
/// flavor = "free"
/// build_type = "release"
/// version_name = "2.3.1"
/// version_code = 42
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    /// Build properties and flags; presence is what matters for flags such
    /// as `ignoreChecks` or `devBuild`.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,

    /// Build-time constants baked into the artifact.
    #[serde(default)]
    pub build_config: BTreeMap<String, String>,

    #[serde(default)]
    pub host: HostSection,

    #[serde(default, rename = "variant")]
    pub variants: Vec<VariantConfig>,
}

/// Validated configuration. Only constructible through
/// `ConfigFile::try_from(RawConfigFile)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub properties: BTreeMap<String, String>,
    pub build_config: BTreeMap<String, String>,
    pub host: HostSection,
    pub variants: Vec<VariantConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            config: raw.config,
            properties: raw.properties,
            build_config: raw.build_config,
            host: raw.host,
            variants: raw.variants,
        }
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Version record location, relative to the project root.
    #[serde(default = "default_version_file")]
    pub version_file: String,

    /// Where changelog artifacts are written, relative to the project root.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Prefix of release tags (`v` gives `v1.4.10`).
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    /// Environment variable whose presence marks a build server.
    #[serde(default = "default_build_server_env")]
    pub build_server_env: String,

    /// Substring that identifies a staging endpoint in `[build_config]`.
    #[serde(default = "default_stage_url_marker")]
    pub stage_url_marker: String,

    /// Reference the generic changelog starts from, unless overridden by the
    /// `changelogSince` property.
    #[serde(default)]
    pub generic_changelog_since: Option<String>,

    /// Number of commits in the generic changelog when no reference is given.
    #[serde(default = "default_changelog_max_entries")]
    pub changelog_max_entries: usize,

    /// Directory that module scaffolding is generated into.
    #[serde(default = "default_modules_dir")]
    pub modules_dir: String,
}

fn default_version_file() -> String {
    "version.properties".to_string()
}

fn default_output_dir() -> String {
    "build/relkit".to_string()
}

fn default_tag_prefix() -> String {
    "v".to_string()
}

fn default_build_server_env() -> String {
    "CI".to_string()
}

fn default_stage_url_marker() -> String {
    "stage".to_string()
}

fn default_changelog_max_entries() -> usize {
    50
}

fn default_modules_dir() -> String {
    "modules".to_string()
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            version_file: default_version_file(),
            output_dir: default_output_dir(),
            tag_prefix: default_tag_prefix(),
            build_server_env: default_build_server_env(),
            stage_url_marker: default_stage_url_marker(),
            generic_changelog_since: None,
            changelog_max_entries: default_changelog_max_entries(),
            modules_dir: default_modules_dir(),
        }
    }
}

/// `[host]` section: tasks the host build adds after the plugin is applied.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct HostSection {
    #[serde(default)]
    pub tasks: Vec<String>,
}

/// `[[variant]]` entries.
#[derive(Debug, Clone, Deserialize)]
pub struct VariantConfig {
    pub flavor: String,

    pub build_type: String,

    /// If `None`, the version name is read from the version file.
    #[serde(default)]
    pub version_name: Option<String>,

    /// If `None`, the version-code timestamp is used.
    #[serde(default)]
    pub version_code: Option<u64>,

    /// Number of output artifacts the variant produces (splits).
    #[serde(default = "default_outputs")]
    pub outputs: usize,
}

fn default_outputs() -> usize {
    1
}
