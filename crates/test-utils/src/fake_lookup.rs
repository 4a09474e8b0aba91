use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use cratewatch::toolchain::ExecutableLookup;

/// An in-memory `PATH`.
///
/// Clones share the same table, so a fake installer can "install" a tool
/// that a locator holding another clone will then find.
#[derive(Debug, Clone, Default)]
pub struct FakeLookup {
    known: Arc<Mutex<HashMap<String, PathBuf>>>,
}

impl FakeLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `name` resolvable as `/usr/bin/<name>`.
    pub fn with(self, name: &str) -> Self {
        self.install(name);
        self
    }

    pub fn install(&self, name: &str) {
        self.known
            .lock()
            .unwrap()
            .insert(name.to_string(), PathBuf::from(format!("/usr/bin/{name}")));
    }
}

impl ExecutableLookup for FakeLookup {
    fn find(&self, name: &str) -> Option<PathBuf> {
        self.known.lock().unwrap().get(name).cloned()
    }
}
