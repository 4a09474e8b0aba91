// src/path_utils.rs

//! Lexical path helpers shared by the builder and the change matcher.
//!
//! Nothing here touches the filesystem: unit directories may not exist yet
//! when patterns are compiled, and output directories are created by the
//! build tool itself.

use std::path::{Component, Path, PathBuf};

/// Remove `.` components and fold `..` into the preceding component.
///
/// Leading `..` components of a relative path are kept, since there is
/// nothing to fold them into.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(comp),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Join `path` onto `root` unless it is already absolute, then normalize.
pub fn anchor(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&root.join(path))
    }
}

/// Express `target` relative to `base`.
///
/// Both paths are normalized first; they should share the same anchor (both
/// absolute, or both relative to the same directory).
pub fn relative_to(base: &Path, target: &Path) -> PathBuf {
    let base = normalize(base);
    let target = normalize(target);

    let base_comps: Vec<Component<'_>> = base
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let target_comps: Vec<Component<'_>> = target
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let common = base_comps
        .iter()
        .zip(target_comps.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base_comps.len() {
        rel.push("..");
    }
    for comp in &target_comps[common..] {
        rel.push(comp.as_os_str());
    }

    if rel.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        rel
    }
}

/// Render a path with forward slashes, as glob patterns expect.
///
/// Only Windows separators are rewritten. On Unix a backslash is a glob
/// escape (`lit\*.rs`) and is kept as is.
#[cfg(windows)]
pub fn slash_str(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Render a path with forward slashes, as glob patterns expect.
///
/// Only Windows separators are rewritten. On Unix a backslash is a glob
/// escape (`lit\*.rs`) and is kept as is.
#[cfg(not(windows))]
pub fn slash_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
