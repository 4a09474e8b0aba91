use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use cratewatch::engine::{BuildBackend, BuildOutcome, EngineEvent};
use cratewatch::errors::Result;

/// A fake build backend that:
/// - records which units were "built"
/// - immediately reports `BuildFinished` with a scripted outcome
///   (default: success)
pub struct FakeBuildBackend {
    events: mpsc::Sender<EngineEvent>,
    started: Arc<Mutex<Vec<String>>>,
    outcomes: HashMap<String, BuildOutcome>,
}

impl FakeBuildBackend {
    pub fn new(events: mpsc::Sender<EngineEvent>, started: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            events,
            started,
            outcomes: HashMap::new(),
        }
    }

    pub fn failing(mut self, unit: &str, reason: &str) -> Self {
        self.outcomes
            .insert(unit.to_string(), BuildOutcome::Failed(reason.to_string()));
        self
    }
}

impl BuildBackend for FakeBuildBackend {
    fn start_build(
        &mut self,
        unit: String,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let tx = self.events.clone();
        let started = Arc::clone(&self.started);
        let outcome = self
            .outcomes
            .get(&unit)
            .cloned()
            .unwrap_or(BuildOutcome::Success);

        Box::pin(async move {
            {
                let mut guard = started.lock().unwrap();
                guard.push(unit.clone());
            }

            tx.send(EngineEvent::BuildFinished { unit, outcome })
                .await
                .map_err(anyhow::Error::from)?;
            Ok(())
        })
    }
}
