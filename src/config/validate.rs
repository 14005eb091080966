// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{RelkitError, Result};
use crate::plugin::PLUGIN_TASK_NAMES;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::RelkitError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_global_config(cfg)?;
    validate_host_tasks(cfg)?;
    validate_variants(cfg)?;
    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    let section = &cfg.config;

    if section.version_file.trim().is_empty() {
        return Err(config_error("[config].version_file must not be empty"));
    }
    if section.output_dir.trim().is_empty() {
        return Err(config_error("[config].output_dir must not be empty"));
    }
    if section.build_server_env.trim().is_empty() {
        return Err(config_error("[config].build_server_env must not be empty"));
    }
    if section.stage_url_marker.is_empty() {
        return Err(config_error("[config].stage_url_marker must not be empty"));
    }
    if section.changelog_max_entries == 0 {
        return Err(config_error(
            "[config].changelog_max_entries must be >= 1 (got 0)",
        ));
    }

    Ok(())
}

fn validate_host_tasks(cfg: &RawConfigFile) -> Result<()> {
    let mut seen = HashSet::new();

    for name in cfg.host.tasks.iter() {
        if name.trim().is_empty() {
            return Err(config_error("[host].tasks contains an empty task name"));
        }
        if PLUGIN_TASK_NAMES.contains(&name.as_str()) {
            return Err(RelkitError::ConfigError(format!(
                "host task '{name}' clashes with a task registered by relkit"
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(RelkitError::ConfigError(format!(
                "host task '{name}' is listed more than once"
            )));
        }
    }

    Ok(())
}

fn validate_variants(cfg: &RawConfigFile) -> Result<()> {
    for (idx, variant) in cfg.variants.iter().enumerate() {
        if variant.flavor.trim().is_empty() {
            return Err(RelkitError::ConfigError(format!(
                "[[variant]] #{idx} has an empty flavor"
            )));
        }
        if variant.build_type.trim().is_empty() {
            return Err(RelkitError::ConfigError(format!(
                "[[variant]] #{idx} ({}) has an empty build_type",
                variant.flavor
            )));
        }
    }
    Ok(())
}

fn config_error(msg: &str) -> RelkitError {
    RelkitError::ConfigError(msg.to_string())
}
