// tests/rule_wiring.rs
mod common;
use crate::common::builders::ConfigFileBuilder;
use crate::common::Harness;

use std::collections::BTreeSet;

use relkit::errors::RelkitError;
use relkit::plugin::{
    GENERATE_GENERIC_CHANGELOG, GENERATE_PROJECT_CHANGELOG, PLUGIN_TASK_NAMES, TAG_PROJECT,
    VERIFIERS,
};
use relkit::registry::TaskRegistry;

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn release_bundle() -> BTreeSet<String> {
    let mut expected = set(&VERIFIERS);
    expected.insert(TAG_PROJECT.to_string());
    expected.insert(GENERATE_PROJECT_CHANGELOG.to_string());
    expected
}

#[test]
fn plugin_registers_fixed_tasks_in_order() {
    let harness = Harness::new();
    let project = harness
        .configure(harness.context(ConfigFileBuilder::new().build()))
        .unwrap();

    let names: Vec<&str> = project.tasks().task_names().collect();
    assert_eq!(names, PLUGIN_TASK_NAMES.to_vec());
}

#[test]
fn changelog_and_tagging_must_run_after_verifiers() {
    let harness = Harness::new();
    let project = harness
        .configure(harness.context(ConfigFileBuilder::new().build()))
        .unwrap();
    let tasks = project.tasks();

    assert_eq!(
        tasks.task(GENERATE_PROJECT_CHANGELOG).unwrap().must_run_after(),
        &set(&VERIFIERS)
    );
    assert_eq!(
        tasks.task(GENERATE_GENERIC_CHANGELOG).unwrap().must_run_after(),
        &set(&VERIFIERS)
    );

    let mut tag_preds = set(&VERIFIERS);
    tag_preds.insert(GENERATE_PROJECT_CHANGELOG.to_string());
    assert_eq!(tasks.task(TAG_PROJECT).unwrap().must_run_after(), &tag_preds);

    // The plugin's own tasks carry no hard dependencies.
    assert!(tasks.tasks().all(|t| t.depends_on().is_empty()));
}

#[test]
fn release_build_config_tasks_get_the_release_bundle() {
    let harness = Harness::new();
    let config = ConfigFileBuilder::new()
        .with_host_task("generateFreeReleaseBuildConfig")
        .with_host_task("generatePaidReleaseBuildConfig")
        .with_host_task("generateFreeDebugBuildConfig")
        .with_host_task("assembleFreeRelease")
        .build();
    let project = harness.configure(harness.context(config)).unwrap();
    let tasks = project.tasks();

    for name in ["generateFreeReleaseBuildConfig", "generatePaidReleaseBuildConfig"] {
        assert_eq!(tasks.task(name).unwrap().depends_on(), &release_bundle(), "{name}");
    }
    for name in ["generateFreeDebugBuildConfig", "assembleFreeRelease"] {
        assert!(tasks.task(name).unwrap().depends_on().is_empty(), "{name}");
    }
}

#[test]
fn pre_dev_release_build_depends_on_generic_changelog() {
    let harness = Harness::new();
    let config = ConfigFileBuilder::new()
        .with_host_task("preDevReleaseBuild")
        .with_host_task("preProdReleaseBuild")
        .build();
    let project = harness.configure(harness.context(config)).unwrap();

    assert_eq!(
        project.tasks().task("preDevReleaseBuild").unwrap().depends_on(),
        &set(&[GENERATE_GENERIC_CHANGELOG])
    );
    assert!(
        project
            .tasks()
            .task("preProdReleaseBuild")
            .unwrap()
            .depends_on()
            .is_empty()
    );
}

#[test]
fn ignore_checks_disables_release_bundle_but_not_dev_hook() {
    let harness = Harness::new();
    let config = ConfigFileBuilder::new()
        .with_host_task("generateFreeReleaseBuildConfig")
        .with_host_task("preDevReleaseBuild")
        .build();
    let project = harness
        .configure(harness.context(config).flag("ignoreChecks"))
        .unwrap();

    assert!(
        project
            .tasks()
            .task("generateFreeReleaseBuildConfig")
            .unwrap()
            .depends_on()
            .is_empty()
    );
    assert_eq!(
        project.tasks().task("preDevReleaseBuild").unwrap().depends_on(),
        &set(&[GENERATE_GENERIC_CHANGELOG])
    );
}

#[test]
fn ignore_checks_from_config_properties_also_applies() {
    let harness = Harness::new();
    let config = ConfigFileBuilder::new()
        .with_property("ignoreChecks", "true")
        .with_host_task("generateFreeReleaseBuildConfig")
        .build();
    let project = harness.configure(harness.context(config)).unwrap();

    assert!(
        project
            .tasks()
            .task("generateFreeReleaseBuildConfig")
            .unwrap()
            .depends_on()
            .is_empty()
    );
}

#[test]
fn tasks_added_later_from_inside_a_listener_are_wired() {
    let harness = Harness::new();
    let mut project = harness
        .configure(harness.context(ConfigFileBuilder::new().build()))
        .unwrap();

    // A host listener that derives a build-config task from each assemble task.
    project
        .tasks_mut()
        .subscribe(Box::new(|reg: &mut TaskRegistry, name: &str| {
            if let Some(flavor) = name
                .strip_prefix("assemble")
                .and_then(|rest| rest.strip_suffix("Release"))
            {
                reg.register(&format!("generate{flavor}ReleaseBuildConfig"), None)?;
            }
            Ok(())
        }))
        .unwrap();

    project
        .tasks_mut()
        .register("assembleKioskRelease", None)
        .unwrap();

    let derived = project
        .tasks()
        .task("generateKioskReleaseBuildConfig")
        .expect("derived task registered");
    assert_eq!(derived.depends_on(), &release_bundle());
    project.tasks().validate_acyclic().unwrap();
}

#[test]
fn rule_targets_cannot_be_made_to_depend_on_their_dependents() {
    let harness = Harness::new();
    let config = ConfigFileBuilder::new()
        .with_host_task("generateFreeReleaseBuildConfig")
        .build();
    let mut project = harness.configure(harness.context(config)).unwrap();

    let err = project
        .tasks_mut()
        .depends_on(TAG_PROJECT, ["generateFreeReleaseBuildConfig"])
        .unwrap_err();
    assert!(matches!(err, RelkitError::DagCycle(_)));
}
