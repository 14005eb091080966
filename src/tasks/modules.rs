// src/tasks/modules.rs

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::context::BuildContext;
use crate::errors::{RelkitError, Result};
use crate::registry::TaskAction;

/// An optional app module that can be scaffolded into the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleSpec {
    pub task_name: &'static str,
    pub module_id: &'static str,
    pub display_name: &'static str,
}

pub const MODULES: [ModuleSpec; 10] = [
    ModuleSpec {
        task_name: "addAdtechModule",
        module_id: "adtech",
        display_name: "Adtech",
    },
    ModuleSpec {
        task_name: "addAndroidTvModule",
        module_id: "android-tv",
        display_name: "Android TV",
    },
    ModuleSpec {
        task_name: "addCxenseModule",
        module_id: "cxense",
        display_name: "Cxense",
    },
    ModuleSpec {
        task_name: "addDfpModule",
        module_id: "dfp",
        display_name: "DFP",
    },
    ModuleSpec {
        task_name: "addInfosoftModule",
        module_id: "infosoft",
        display_name: "Infosoft",
    },
    ModuleSpec {
        task_name: "addKindleModule",
        module_id: "kindle",
        display_name: "Kindle",
    },
    ModuleSpec {
        task_name: "addSpidModule",
        module_id: "spid",
        display_name: "SPiD",
    },
    ModuleSpec {
        task_name: "addTnsDkModule",
        module_id: "tns-gallup-dk",
        display_name: "TNS Gallup DK",
    },
    ModuleSpec {
        task_name: "addTnsNoModule",
        module_id: "tns-gallup-no",
        display_name: "TNS Gallup NO",
    },
    ModuleSpec {
        task_name: "addComScoreModule",
        module_id: "comscore",
        display_name: "comScore",
    },
];

#[derive(Debug, Serialize)]
struct ModuleManifest<'a> {
    id: &'a str,
    name: &'a str,
    enabled: bool,
}

/// Writes `<modules_dir>/<module>/module.toml`. An existing manifest is left
/// untouched.
#[derive(Debug, Clone, Copy)]
pub struct AddModule {
    pub spec: ModuleSpec,
}

impl AddModule {
    pub fn new(spec: ModuleSpec) -> Self {
        Self { spec }
    }

    pub fn manifest_path(&self, ctx: &BuildContext) -> PathBuf {
        ctx.resolve(&ctx.config().config.modules_dir)
            .join(self.spec.module_id)
            .join("module.toml")
    }
}

impl TaskAction for AddModule {
    fn execute(&self, ctx: &BuildContext) -> Result<()> {
        let path = self.manifest_path(ctx);
        if ctx.fs().exists(&path) {
            info!(module = self.spec.module_id, path = ?path, "module already present; leaving it as is");
            return Ok(());
        }

        let manifest = ModuleManifest {
            id: self.spec.module_id,
            name: self.spec.display_name,
            enabled: true,
        };
        let contents = toml::to_string(&manifest).map_err(|e| {
            RelkitError::ConfigError(format!(
                "could not render manifest for module '{}': {e}",
                self.spec.module_id
            ))
        })?;

        ctx.fs().write(&path, contents.as_bytes())?;
        info!(module = self.spec.module_id, path = ?path, "module added");
        Ok(())
    }
}
