// src/toolchain/lookup.rs

//! Finding executables on `PATH`.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Resolve an executable name to a path.
pub trait ExecutableLookup: Send + Sync {
    /// Returns the resolved path, or `None` if `name` is not discoverable.
    fn find(&self, name: &str) -> Option<PathBuf>;
}

/// Lookup against the process `PATH` (or an explicit search path).
#[derive(Debug, Clone, Default)]
pub struct PathLookup {
    search_path: Option<OsString>,
}

impl PathLookup {
    /// Search the `PATH` of the current process, read on every lookup so that
    /// a freshly installed tool is picked up.
    pub fn from_env() -> Self {
        Self { search_path: None }
    }

    /// Search an explicit `PATH`-style list instead of the environment.
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }

    fn search_path(&self) -> Option<OsString> {
        self.search_path.clone().or_else(|| env::var_os("PATH"))
    }
}

impl ExecutableLookup for PathLookup {
    fn find(&self, name: &str) -> Option<PathBuf> {
        let candidate = Path::new(name);

        // Names with a directory component are checked as given.
        if candidate.components().count() > 1 {
            return with_extensions(candidate).into_iter().find(|p| is_executable(p));
        }

        let search_path = self.search_path()?;
        env::split_paths(&search_path)
            .filter(|dir| !dir.as_os_str().is_empty())
            .flat_map(|dir| with_extensions(&dir.join(name)))
            .find(|p| is_executable(p))
    }
}

#[cfg(windows)]
fn with_extensions(path: &Path) -> Vec<PathBuf> {
    if path.extension().is_some() {
        return vec![path.to_path_buf()];
    }
    let pathext = env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
    let mut out = vec![path.to_path_buf()];
    for ext in pathext.split(';').filter(|e| !e.is_empty()) {
        let mut p = path.as_os_str().to_owned();
        p.push(ext);
        out.push(PathBuf::from(p));
    }
    out
}

#[cfg(not(windows))]
fn with_extensions(path: &Path) -> Vec<PathBuf> {
    vec![path.to_path_buf()]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    match path.metadata() {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
