// tests/config_loading.rs

mod common;
use crate::common::init_tracing;

use std::io::Write;

use tempfile::NamedTempFile;

use cratewatch::config::{load_and_validate, parse_str, ConfigFile};
use cratewatch::errors::CrateWatchError;
use cratewatch::unit::{default_watch_patterns, BuildUnit};
use cratewatch_test_utils::builders::{ConfigFileBuilder, CrateConfigBuilder};

fn validate(toml: &str) -> Result<ConfigFile, CrateWatchError> {
    ConfigFile::try_from(parse_str(toml)?)
}

#[test]
fn loads_crates_in_declaration_order_with_defaults() {
    init_tracing();

    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[[crate]]
name = "zeta"
path = "../zeta"

[[crate]]
name = "alpha"
path = "crates/alpha"
watch = ["crates/alpha/**/*.rs"]
"#
    )
    .unwrap();

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.toolchain().tool, "wasm-pack");
    assert_eq!(cfg.toolchain().installer, "npm");
    assert_eq!(cfg.build().out_root, "node_modules");
    assert_eq!(cfg.build().target, "web");
    assert!(cfg.build().extra_args.is_empty());

    let units = cfg.units();
    let names: Vec<&str> = units.iter().map(|u| u.name()).collect();
    assert_eq!(names, vec!["zeta", "alpha"]);
    assert_eq!(
        units[0].watch_patterns(),
        &["../zeta/src/**".to_string(), "../zeta/Cargo.toml".to_string()]
    );
    assert_eq!(units[1].watch_patterns(), &["crates/alpha/**/*.rs".to_string()]);
}

#[test]
fn default_watch_set_is_exactly_src_and_manifest() {
    for path in ["my-crate", "../wasm", "a/b/c", "."] {
        let unit = BuildUnit::new("x", path, None);
        assert_eq!(
            unit.watch_patterns(),
            &[format!("{path}/src/**"), format!("{path}/Cargo.toml")]
        );
        assert_eq!(
            unit.watch_patterns(),
            default_watch_patterns(unit.source_path()).as_slice()
        );
    }
}

#[test]
fn explicit_empty_watch_list_is_kept() {
    let unit = BuildUnit::new("x", "x", Some(Vec::new()));
    assert!(unit.watch_patterns().is_empty());
}

#[test]
fn toolchain_and_build_sections_override_defaults() {
    let cfg = validate(
        r#"
[toolchain]
tool = "/opt/bin/wasm-pack"
installer = "pnpm"

[build]
out_root = "web/deps"
target = "bundler"
extra_args = ["--no-typescript"]

[[crate]]
name = "a"
path = "a"
"#,
    )
    .unwrap();

    assert_eq!(cfg.toolchain().tool, "/opt/bin/wasm-pack");
    assert_eq!(cfg.toolchain().installer, "pnpm");
    assert_eq!(cfg.build().out_root, "web/deps");
    assert_eq!(cfg.build().target, "bundler");
    assert_eq!(cfg.build().extra_args, vec!["--no-typescript".to_string()]);
}

#[test]
fn config_without_crates_is_rejected() {
    match validate("[build]\ntarget = \"web\"\n") {
        Err(CrateWatchError::ConfigError(msg)) => assert!(msg.contains("at least one")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn duplicate_crate_names_are_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_crate(CrateConfigBuilder::new("dup", "a").build())
        .with_crate(CrateConfigBuilder::new("dup", "b").build())
        .raw();

    match ConfigFile::try_from(raw) {
        Err(CrateWatchError::ConfigError(msg)) => {
            assert!(msg.contains("duplicate"));
            assert!(msg.contains("dup"));
        }
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn empty_name_or_path_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_crate(CrateConfigBuilder::new("", "a").build())
        .raw();
    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(CrateWatchError::ConfigError(_))
    ));

    let raw = ConfigFileBuilder::new()
        .with_crate(CrateConfigBuilder::new("a", "  ").build())
        .raw();
    match ConfigFile::try_from(raw) {
        Err(CrateWatchError::ConfigError(msg)) => assert!(msg.contains("empty `path`")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn invalid_watch_glob_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_crate(CrateConfigBuilder::new("a", "a").watch("a/src/[").build())
        .raw();

    match ConfigFile::try_from(raw) {
        Err(CrateWatchError::ConfigError(msg)) => {
            assert!(msg.contains("invalid watch pattern"));
            assert!(msg.contains("a/src/["));
        }
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn empty_target_is_rejected() {
    let raw = ConfigFileBuilder::new()
        .with_target("")
        .with_crate(CrateConfigBuilder::new("a", "a").build())
        .raw();

    match ConfigFile::try_from(raw) {
        Err(CrateWatchError::ConfigError(msg)) => assert!(msg.contains("[build].target")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn malformed_toml_is_a_toml_error() {
    assert!(matches!(
        parse_str("[[crate]\nname = "),
        Err(CrateWatchError::TomlError(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_and_validate(dir.path().join("nope.toml"));
    assert!(matches!(result, Err(CrateWatchError::IoError(_))));
}
