#![allow(dead_code)]

use std::path::PathBuf;

pub use cratewatch_test_utils::{init_tracing, with_timeout};

/// Project root used by tests that never touch the filesystem.
pub fn project_root() -> PathBuf {
    PathBuf::from("/work/app")
}

/// Yield to other tasks until `cond` holds (bounded by `with_timeout`).
pub async fn wait_until<F: FnMut() -> bool>(mut cond: F) {
    with_timeout(async {
        while !cond() {
            tokio::task::yield_now().await;
        }
    })
    .await;
}
