// tests/output_naming.rs
mod common;
use crate::common::builders::{variant, ConfigFileBuilder};
use crate::common::Harness;

#[test]
fn release_outputs_are_renamed_at_configuration() {
    let harness = Harness::new();
    let config = ConfigFileBuilder::new()
        .with_variant(variant("free", "release", "2.3.1", 42))
        .with_variant(variant("free", "debug", "2.3.1", 42))
        .with_variant(variant("paid", "release", "10.0.0", 7))
        .build();

    let project = harness.configure(harness.context(config)).unwrap();
    let names: Vec<&str> = project
        .variants()
        .iter()
        .map(|v| v.outputs[0].output_file_name.as_str())
        .collect();

    assert_eq!(
        names,
        vec!["free_231_42.apk", "app-free-debug.apk", "paid_1000_7.apk"]
    );
}

#[test]
fn apk_path_property_changes_nothing() {
    let harness = Harness::new();
    let config = ConfigFileBuilder::new()
        .with_variant(variant("free", "release", "2.3.1", 42))
        .build();

    let project = harness
        .configure(harness.context(config).flag("apkPath=/tmp/releases"))
        .unwrap();

    assert_eq!(
        project.variants()[0].outputs[0].output_file_name,
        "free_231_42.apk"
    );
}

#[test]
fn dev_build_variant_without_code_uses_one() {
    let harness = Harness::new();
    let mut dev = variant("dev", "release", "1.2.3", 0);
    dev.version_code = None;
    let config = ConfigFileBuilder::new().with_variant(dev).build();

    let project = harness
        .configure(harness.context(config).flag("devBuild"))
        .unwrap();

    assert_eq!(project.variants()[0].version_code, 1);
    assert_eq!(
        project.variants()[0].outputs[0].output_file_name,
        "dev_123_1.apk"
    );
}
