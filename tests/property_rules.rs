// tests/property_rules.rs
mod common;
use crate::common::builders::ConfigFileBuilder;
use crate::common::Harness;

use std::collections::BTreeSet;

use proptest::prelude::*;
use relkit::output::normalize_version_name;
use relkit::plugin::{
    GENERATE_GENERIC_CHANGELOG, GENERATE_PROJECT_CHANGELOG, PLUGIN_TASK_NAMES, TAG_PROJECT,
    VERIFIERS,
};
use relkit::rules::RuleEngine;

fn release_bundle() -> BTreeSet<String> {
    let mut bundle: BTreeSet<String> = VERIFIERS.iter().map(|s| s.to_string()).collect();
    bundle.insert(TAG_PROJECT.to_string());
    bundle.insert(GENERATE_PROJECT_CHANGELOG.to_string());
    bundle
}

// Mix of matching names, near misses and noise.
fn task_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z]{1,16}",
        "generate[A-Z][a-z]{0,8}ReleaseBuildConfig",
        "generate[A-Z][a-z]{0,8}ReleaseBuildConfigs",
        "Generate[A-Z][a-z]{0,8}ReleaseBuildConfig",
        "[a-z]{1,4}generate[A-Z][a-z]{0,8}ReleaseBuildConfig",
        Just("preDevReleaseBuild".to_string()),
        Just("preDevReleaseBuildX".to_string()),
        Just("preProdReleaseBuild".to_string()),
    ]
}

proptest! {
    #[test]
    fn host_tasks_only_gain_edges_from_their_own_rule(name in task_name_strategy()) {
        prop_assume!(!PLUGIN_TASK_NAMES.contains(&name.as_str()));

        let harness = Harness::new();
        let mut project = harness
            .configure(harness.context(ConfigFileBuilder::new().build()))
            .unwrap();
        project.tasks_mut().register(&name, None).unwrap();

        let task = project.tasks().task(&name).unwrap();
        let expected: BTreeSet<String> =
            if name.starts_with("generate") && name.ends_with("ReleaseBuildConfig") {
                release_bundle()
            } else if name == "preDevReleaseBuild" {
                BTreeSet::from([GENERATE_GENERIC_CHANGELOG.to_string()])
            } else {
                BTreeSet::new()
            };

        prop_assert_eq!(task.depends_on(), &expected);
        prop_assert!(task.must_run_after().is_empty());

        // The plugin's own tasks are never touched by the rules.
        for plugin_task in PLUGIN_TASK_NAMES {
            prop_assert!(project.tasks().task(plugin_task).unwrap().depends_on().is_empty());
        }
    }

    #[test]
    fn replaying_a_task_through_the_rules_adds_nothing(name in task_name_strategy()) {
        prop_assume!(!PLUGIN_TASK_NAMES.contains(&name.as_str()));

        let harness = Harness::new();
        let mut project = harness
            .configure(harness.context(ConfigFileBuilder::new().build()))
            .unwrap();
        project.tasks_mut().register(&name, None).unwrap();
        let before = project.tasks().task(&name).unwrap().depends_on().clone();

        let engine = RuleEngine::release_rules(false);
        let added = engine.on_task_registered(project.tasks_mut(), &name).unwrap();

        prop_assert_eq!(added, 0);
        prop_assert_eq!(project.tasks().task(&name).unwrap().depends_on(), &before);
    }

    #[test]
    fn normalized_version_names_keep_every_other_character(
        parts in proptest::collection::vec(0u32..1000, 1..5)
    ) {
        let name = parts.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(".");
        let expected: String = parts.iter().map(|p| p.to_string()).collect();

        let normalized = normalize_version_name(&name);

        prop_assert!(!normalized.contains('.'));
        prop_assert_eq!(normalized, expected);
    }
}
