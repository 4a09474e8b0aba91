// tests/change_matcher.rs

mod common;
use crate::common::{init_tracing, project_root};

use std::error::Error;
use std::path::{Path, PathBuf};

use proptest::prelude::*;

use cratewatch::unit::BuildUnit;
use cratewatch::watch::{literal_dir_prefix, ChangeMatcher};
use cratewatch_test_utils::builders::unit;

type TestResult = Result<(), Box<dyn Error>>;

fn two_units() -> Vec<BuildUnit> {
    vec![unit("a", "crates/a"), unit("b", "crates/b")]
}

#[test]
fn default_patterns_match_sources_and_manifest() -> TestResult {
    init_tracing();
    let matcher = ChangeMatcher::new(project_root(), &two_units())?;

    assert_eq!(
        matcher.affected_units(Path::new("/work/app/crates/a/src/lib.rs")),
        vec!["a".to_string()]
    );
    assert_eq!(
        matcher.affected_units(Path::new("/work/app/crates/a/src/nested/deep/mod.rs")),
        vec!["a".to_string()]
    );
    assert_eq!(
        matcher.affected_units(Path::new("/work/app/crates/b/Cargo.toml")),
        vec!["b".to_string()]
    );
    Ok(())
}

#[test]
fn unrelated_files_match_nothing() -> TestResult {
    let matcher = ChangeMatcher::new(project_root(), &two_units())?;

    for path in [
        "/work/app/index.html",
        "/work/app/crates/a/Cargo.lock",
        "/work/app/crates/a/target/debug/a.wasm",
        "/work/app/crates/ab/src/lib.rs",
        "/elsewhere/crates/a/src/lib.rs",
    ] {
        assert!(
            matcher.affected_units(Path::new(path)).is_empty(),
            "{path} should not match"
        );
    }
    Ok(())
}

#[test]
fn relative_change_paths_are_anchored_at_the_root() -> TestResult {
    let matcher = ChangeMatcher::new(project_root(), &two_units())?;

    assert_eq!(
        matcher.affected_units(Path::new("crates/b/src/lib.rs")),
        vec!["b".to_string()]
    );
    assert_eq!(
        matcher.affected_units(Path::new("./crates/x/../a/src/lib.rs")),
        vec!["a".to_string()]
    );
    Ok(())
}

#[test]
fn sibling_crate_outside_the_root_is_matched() -> TestResult {
    let matcher = ChangeMatcher::new(project_root(), &[unit("lib", "../wasm-lib")])?;

    assert_eq!(
        matcher.profiles()[0].patterns(),
        &[
            "/work/wasm-lib/src/**".to_string(),
            "/work/wasm-lib/Cargo.toml".to_string()
        ]
    );
    assert_eq!(
        matcher.affected_units(Path::new("/work/wasm-lib/src/lib.rs")),
        vec!["lib".to_string()]
    );
    Ok(())
}

#[test]
fn single_star_stays_within_one_segment() -> TestResult {
    let units = vec![BuildUnit::new(
        "a",
        "crates/a",
        Some(vec!["crates/a/src/*.rs".to_string()]),
    )];
    let matcher = ChangeMatcher::new(project_root(), &units)?;

    assert_eq!(
        matcher.affected_units(Path::new("/work/app/crates/a/src/lib.rs")),
        vec!["a".to_string()]
    );
    assert!(matcher
        .affected_units(Path::new("/work/app/crates/a/src/inner/mod.rs"))
        .is_empty());
    Ok(())
}

#[test]
fn overlapping_patterns_report_every_unit_in_declaration_order() -> TestResult {
    let shared = "shared/**".to_string();
    let units = vec![
        BuildUnit::new("second", "crates/b", Some(vec![shared.clone()])),
        BuildUnit::new("first", "crates/a", Some(vec![shared])),
    ];
    let matcher = ChangeMatcher::new(project_root(), &units)?;

    assert_eq!(
        matcher.affected_units(Path::new("/work/app/shared/util.rs")),
        vec!["second".to_string(), "first".to_string()]
    );
    Ok(())
}

#[test]
fn unit_without_patterns_never_matches() -> TestResult {
    let units = vec![BuildUnit::new("a", "crates/a", Some(Vec::new()))];
    let matcher = ChangeMatcher::new(project_root(), &units)?;

    assert!(matcher
        .affected_units(Path::new("/work/app/crates/a/src/lib.rs"))
        .is_empty());
    Ok(())
}

#[test]
fn hidden_files_are_not_matched_by_wildcards() -> TestResult {
    let matcher = ChangeMatcher::new(project_root(), &two_units())?;

    for path in [
        "/work/app/crates/a/src/.lib.rs.swp",
        "/work/app/crates/a/src/.hidden/mod.rs",
        "/work/app/crates/a/src/nested/.#lib.rs",
    ] {
        assert!(
            matcher.affected_units(Path::new(path)).is_empty(),
            "{path} should not match"
        );
    }
    Ok(())
}

#[test]
fn dot_prefixed_pattern_components_match_hidden_paths() -> TestResult {
    let units = vec![BuildUnit::new(
        "a",
        "crates/a",
        Some(vec![
            "crates/a/.cargo/config.toml".to_string(),
            "crates/a/src/.*".to_string(),
        ]),
    )];
    let matcher = ChangeMatcher::new(project_root(), &units)?;

    assert_eq!(
        matcher.affected_units(Path::new("/work/app/crates/a/.cargo/config.toml")),
        vec!["a".to_string()]
    );
    assert_eq!(
        matcher.affected_units(Path::new("/work/app/crates/a/src/.env")),
        vec!["a".to_string()]
    );
    assert!(matcher
        .affected_units(Path::new("/work/app/crates/a/src/lib.rs"))
        .is_empty());
    Ok(())
}

#[test]
fn hidden_directory_in_the_project_root_still_matches() -> TestResult {
    let matcher = ChangeMatcher::new("/home/dev/.projects/app", &[unit("a", "crates/a")])?;

    assert_eq!(
        matcher.affected_units(Path::new("/home/dev/.projects/app/crates/a/src/lib.rs")),
        vec!["a".to_string()]
    );
    assert!(matcher
        .affected_units(Path::new("/home/dev/.projects/app/crates/a/src/.lib.rs.swp"))
        .is_empty());
    Ok(())
}

#[cfg(unix)]
#[test]
fn escaped_metacharacters_stay_literal() -> TestResult {
    let units = vec![BuildUnit::new(
        "a",
        "crates/a",
        Some(vec![r"crates/a/src/lit\*.rs".to_string()]),
    )];
    let matcher = ChangeMatcher::new(project_root(), &units)?;

    assert_eq!(
        matcher.profiles()[0].patterns(),
        &[r"/work/app/crates/a/src/lit\*.rs".to_string()]
    );
    assert_eq!(
        matcher.affected_units(Path::new("/work/app/crates/a/src/lit*.rs")),
        vec!["a".to_string()]
    );
    assert!(matcher
        .affected_units(Path::new("/work/app/crates/a/src/lit/x.rs"))
        .is_empty());
    assert!(matcher
        .affected_units(Path::new("/work/app/crates/a/src/literal.rs"))
        .is_empty());
    Ok(())
}

#[test]
fn literal_prefix_stops_at_first_glob_component() {
    assert_eq!(
        literal_dir_prefix("crates/a/src/**/*.rs"),
        PathBuf::from("crates/a/src")
    );
    assert_eq!(literal_dir_prefix("../lib/{a,b}/x"), PathBuf::from("../lib"));
    assert_eq!(literal_dir_prefix("crates/a/Cargo.toml"), PathBuf::from("crates/a"));
}

proptest! {
    // Adding a pattern to a unit can only grow the set of paths it matches.
    #[test]
    fn extra_pattern_never_removes_matches(
        segments in proptest::collection::vec("[a-z]{1,6}", 1..5),
        extra in "[a-z]{1,6}",
    ) {
        let rel = format!("crates/a/{}", segments.join("/"));
        let path = project_root().join(&rel);

        let base = vec![unit("a", "crates/a")];
        let mut patterns = base[0].watch_patterns().to_vec();
        patterns.push(format!("{extra}/**"));
        let wider = vec![BuildUnit::new("a", "crates/a", Some(patterns))];

        let narrow = ChangeMatcher::new(project_root(), &base).unwrap();
        let wide = ChangeMatcher::new(project_root(), &wider).unwrap();

        if !narrow.affected_units(&path).is_empty() {
            prop_assert_eq!(wide.affected_units(&path), vec!["a".to_string()]);
        }
    }

    // Every file under `<path>/src` belongs to the unit.
    #[test]
    fn everything_under_src_matches(
        segments in proptest::collection::vec("[a-z_]{1,8}", 1..6),
    ) {
        let matcher = ChangeMatcher::new(project_root(), &[unit("a", "crates/a")]).unwrap();
        let path = project_root().join("crates/a/src").join(segments.join("/"));
        prop_assert_eq!(matcher.affected_units(&path), vec!["a".to_string()]);
    }
}
