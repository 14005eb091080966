// src/output.rs

//! Release artifact naming: `{flavor}_{versionNoDots}_{versionCode}.apk`.

use tracing::{debug, info};

use crate::config::VariantConfig;
use crate::errors::Result;
use crate::properties::{PropertySource, APK_PATH};
use crate::version::BuildExtensions;

/// Only variants of this build type are renamed.
pub const RELEASE_BUILD_TYPE: &str = "release";

/// One artifact produced by a variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantOutput {
    pub output_file_name: String,
}

/// A flavor/build-type combination as seen by the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildVariant {
    pub flavor_name: String,
    pub version_name: String,
    pub version_code: u64,
    pub build_type: String,
    pub outputs: Vec<VariantOutput>,
}

impl BuildVariant {
    /// Variant with `outputs` artifacts carrying the host's default name.
    pub fn new(
        flavor_name: &str,
        build_type: &str,
        version_name: &str,
        version_code: u64,
        outputs: usize,
    ) -> Self {
        let default_name = format!("app-{flavor_name}-{build_type}.apk");
        Self {
            flavor_name: flavor_name.to_string(),
            version_name: version_name.to_string(),
            version_code,
            build_type: build_type.to_string(),
            outputs: vec![
                VariantOutput {
                    output_file_name: default_name,
                };
                outputs
            ],
        }
    }

    /// Resolve a configured variant, filling missing version values from the
    /// build extensions.
    pub fn from_config(cfg: &VariantConfig, ext: &BuildExtensions<'_>) -> Result<Self> {
        let version_name = match &cfg.version_name {
            Some(name) => name.clone(),
            None => ext.version_name_from_file()?,
        };
        let version_code = cfg
            .version_code
            .unwrap_or_else(|| ext.version_code_timestamp());

        Ok(Self::new(
            &cfg.flavor,
            &cfg.build_type,
            &version_name,
            version_code,
            cfg.outputs,
        ))
    }

    pub fn is_release(&self) -> bool {
        self.build_type == RELEASE_BUILD_TYPE
    }
}

/// `"1.2.3"` -> `"123"`.
pub fn normalize_version_name(version_name: &str) -> String {
    version_name.replace('.', "")
}

pub fn output_file_name(variant: &BuildVariant) -> String {
    format!(
        "{}_{}_{}.apk",
        variant.flavor_name,
        normalize_version_name(&variant.version_name),
        variant.version_code
    )
}

/// Rename the outputs of every release variant. Returns how many outputs
/// were renamed.
pub fn apply_output_names(variants: &mut [BuildVariant], props: &PropertySource) -> usize {
    if let Some(path) = props.get(APK_PATH) {
        // Reserved: a custom release directory is not supported yet.
        debug!(apk_path = %path, "apkPath is set but has no effect");
    }

    let mut renamed = 0;
    for variant in variants.iter_mut().filter(|v| v.is_release()) {
        let name = output_file_name(variant);
        for output in variant.outputs.iter_mut() {
            output.output_file_name = name.clone();
            renamed += 1;
        }
        info!(flavor = %variant.flavor_name, output = %name, "release output named");
    }
    renamed
}
