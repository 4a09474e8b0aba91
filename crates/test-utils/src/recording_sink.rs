use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cratewatch::errors::Result;
use cratewatch::host::ReloadSink;

/// Reload sink that only counts reloads.
#[derive(Debug, Clone, Default)]
pub struct RecordingReloadSink {
    count: Arc<AtomicUsize>,
}

impl RecordingReloadSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl ReloadSink for RecordingReloadSink {
    fn full_reload(&mut self) -> Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
