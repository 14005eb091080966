// src/plugin.rs

//! Registers relkit's tasks on a project and wires their ordering.

use std::sync::Arc;

use tracing::info;

use crate::errors::Result;
use crate::output::apply_output_names;
use crate::project::Project;
use crate::properties::IGNORE_CHECKS;
use crate::registry::TaskAction;
use crate::rules::RuleEngine;
use crate::tasks::{
    AddModule, GenerateGenericChangeLog, GenerateProjectChangeLog, GetFlavors, IncreaseVersion,
    MODULES, TagProject, VerifyBuildServer, VerifyNoStageUrl, VerifyVersionControl,
};
use crate::version::VersionField;

pub const VERIFY_VERSION_CONTROL: &str = "verifyVersionControl";
pub const VERIFY_BUILD_SERVER: &str = "verifyBuildServer";
pub const VERIFY_NO_STAGE_URL: &str = "verifyNoStageUrl";
pub const GENERATE_PROJECT_CHANGELOG: &str = "generateProjectChangeLog";
pub const GENERATE_GENERIC_CHANGELOG: &str = "generateGenericChangeLog";
pub const INCREASE_MAJOR_VERSION: &str = "increaseMajorVersionName";
pub const INCREASE_MINOR_VERSION: &str = "increaseMinorVersionName";
pub const INCREASE_BUILD_VERSION: &str = "increaseBuildVersionName";
pub const GET_FLAVORS: &str = "getFlavors";
pub const TAG_PROJECT: &str = "tagProject";

pub const VERIFIERS: [&str; 3] = [VERIFY_VERSION_CONTROL, VERIFY_BUILD_SERVER, VERIFY_NO_STAGE_URL];

/// Every task name relkit registers, in registration order.
pub const PLUGIN_TASK_NAMES: [&str; 20] = [
    VERIFY_VERSION_CONTROL,
    VERIFY_BUILD_SERVER,
    VERIFY_NO_STAGE_URL,
    GENERATE_PROJECT_CHANGELOG,
    GENERATE_GENERIC_CHANGELOG,
    INCREASE_MAJOR_VERSION,
    INCREASE_MINOR_VERSION,
    INCREASE_BUILD_VERSION,
    GET_FLAVORS,
    "addAdtechModule",
    "addAndroidTvModule",
    "addCxenseModule",
    "addDfpModule",
    "addInfosoftModule",
    "addKindleModule",
    "addSpidModule",
    "addTnsDkModule",
    "addTnsNoModule",
    "addComScoreModule",
    TAG_PROJECT,
];

/// The release-management plugin.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleasePlugin;

impl ReleasePlugin {
    /// Register all tasks, install the naming rules, and name release
    /// outputs. Any error leaves the project unusable; callers abort.
    pub fn apply(&self, project: &mut Project) -> Result<()> {
        register_tasks(project)?;

        let ignore_checks = project.context().properties().has(IGNORE_CHECKS);
        RuleEngine::release_rules(ignore_checks).install(project.tasks_mut())?;

        let props = project.context().properties().clone();
        apply_output_names(project.variants_mut(), &props);

        info!(tasks = project.tasks().len(), "release plugin applied");
        Ok(())
    }
}

fn action(a: impl TaskAction + 'static) -> Option<Arc<dyn TaskAction>> {
    Some(Arc::new(a))
}

/// Register the fixed tasks. All rule targets exist once this returns.
fn register_tasks(project: &mut Project) -> Result<()> {
    let tasks = project.tasks_mut();

    tasks.register(VERIFY_VERSION_CONTROL, action(VerifyVersionControl))?;
    tasks.register(VERIFY_BUILD_SERVER, action(VerifyBuildServer))?;
    tasks.register(VERIFY_NO_STAGE_URL, action(VerifyNoStageUrl))?;

    tasks
        .register(GENERATE_PROJECT_CHANGELOG, action(GenerateProjectChangeLog))?
        .must_run_after(VERIFIERS)?;
    tasks
        .register(GENERATE_GENERIC_CHANGELOG, action(GenerateGenericChangeLog))?
        .must_run_after(VERIFIERS)?;

    tasks.register(
        INCREASE_MAJOR_VERSION,
        action(IncreaseVersion::new(VersionField::Major)),
    )?;
    tasks.register(
        INCREASE_MINOR_VERSION,
        action(IncreaseVersion::new(VersionField::Minor)),
    )?;
    tasks.register(
        INCREASE_BUILD_VERSION,
        action(IncreaseVersion::new(VersionField::Build)),
    )?;

    tasks.register(GET_FLAVORS, action(GetFlavors))?;

    for spec in MODULES {
        tasks.register(spec.task_name, action(AddModule::new(spec)))?;
    }

    tasks
        .register(TAG_PROJECT, action(TagProject))?
        .must_run_after(VERIFIERS.iter().copied().chain([GENERATE_PROJECT_CHANGELOG]))?;

    Ok(())
}
