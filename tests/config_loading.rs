// tests/config_loading.rs

use std::io::Write;

use relkit::config::load_and_validate;
use relkit::errors::{ErrorKind, RelkitError};
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn full_config_round_trips_into_typed_sections() {
    let file = config_file(
        r#"
[config]
version_file = "app/version.properties"
tag_prefix = "release-"
changelog_max_entries = 20

[properties]
ignoreChecks = ""

[build_config]
API_URL = "https://api.example.com"

[host]
tasks = ["assembleFreeRelease", "generateFreeReleaseBuildConfig", "preDevReleaseBuild"]

[[variant]]
flavor = "free"
build_type = "release"
version_name = "2.3.1"
version_code = 42
outputs = 2
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.config.version_file, "app/version.properties");
    assert_eq!(cfg.config.tag_prefix, "release-");
    assert_eq!(cfg.config.changelog_max_entries, 20);
    assert_eq!(cfg.config.output_dir, "build/relkit");
    assert!(cfg.properties.contains_key("ignoreChecks"));
    assert_eq!(cfg.build_config["API_URL"], "https://api.example.com");
    assert_eq!(cfg.host.tasks.len(), 3);
    assert_eq!(cfg.variants[0].outputs, 2);
    assert_eq!(cfg.variants[0].version_code, Some(42));
}

#[test]
fn host_task_shadowing_a_plugin_task_is_a_config_error() {
    let file = config_file(
        r#"
[host]
tasks = ["generateProjectChangeLog"]
"#,
    );

    match load_and_validate(file.path()) {
        Err(RelkitError::ConfigError(msg)) => {
            assert!(msg.contains("generateProjectChangeLog"));
            assert!(msg.contains("clashes"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn variant_without_build_type_fails_to_parse() {
    let file = config_file(
        r#"
[[variant]]
flavor = "free"
"#,
    );

    let err = load_and_validate(file.path()).unwrap_err();
    assert!(matches!(err, RelkitError::TomlError(_)));
    assert_eq!(err.kind(), ErrorKind::ConfigurationFault);
}

#[test]
fn empty_flavor_is_rejected() {
    let file = config_file(
        r#"
[[variant]]
flavor = ""
build_type = "release"
"#,
    );

    match load_and_validate(file.path()) {
        Err(RelkitError::ConfigError(msg)) => assert!(msg.contains("empty flavor")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn missing_config_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_and_validate(dir.path().join("Relkit.toml")).unwrap_err();

    assert!(matches!(err, RelkitError::IoError(_)));
    assert_eq!(err.kind(), ErrorKind::Io);
}
