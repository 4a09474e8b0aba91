// src/host/stdout.rs

use std::io::{self, Write};

use serde::Serialize;
use tracing::debug;

use crate::errors::Result;

use super::ReloadSink;

#[derive(Serialize)]
struct ReloadMessage {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Reload sink for the CLI host: writes one `{"type":"full-reload"}` line to
/// stdout per reload, so a dev server (or a wrapper script) can pick it up.
///
/// Logs go to stderr, so stdout carries nothing but these messages.
#[derive(Debug, Default)]
pub struct StdoutReloadSink {
    sent: usize,
}

impl StdoutReloadSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of reloads sent so far.
    pub fn sent(&self) -> usize {
        self.sent
    }
}

impl ReloadSink for StdoutReloadSink {
    fn full_reload(&mut self) -> Result<()> {
        let line = serde_json::to_string(&ReloadMessage {
            kind: "full-reload",
        })
        .map_err(anyhow::Error::from)?;

        let mut out = io::stdout().lock();
        writeln!(out, "{line}")?;
        out.flush()?;

        self.sent += 1;
        debug!(sent = self.sent, "full-reload sent");
        Ok(())
    }
}
