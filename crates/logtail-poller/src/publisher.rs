//! State publisher: latest-value fan-out of `ControllerState`.
//!
//! All mutations run inside the watch channel's write lock, so the
//! generation comparison and the write it guards cannot interleave with a
//! retarget from another task.

use std::sync::Arc;

use logtail_core::{ControllerState, FetchAttempt, Generation, Target};
use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct StatePublisher {
    tx: Arc<watch::Sender<ControllerState>>,
}

impl StatePublisher {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ControllerState::new());
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> ControllerState {
        self.tx.borrow().clone()
    }

    pub fn generation(&self) -> Generation {
        self.tx.borrow().generation
    }

    /// Start a new generation for `target` (`None` goes idle).
    pub fn retarget(&self, target: Option<Target>) -> Generation {
        let mut generation = Generation::ZERO;
        self.tx.send_modify(|state| {
            generation = state.retarget(target);
        });
        generation
    }

    pub fn begin_tick(&self, generation: Generation) -> bool {
        self.tx.send_if_modified(|state| state.begin_tick(generation))
    }

    /// Classify and publish `attempt`. Returns `false` if it was stale.
    pub fn publish(&self, attempt: &FetchAttempt) -> bool {
        let accepted = self.tx.send_if_modified(|state| state.accept(attempt));
        if !accepted {
            tracing::debug!(
                "dropping stale result for {} ({})",
                attempt.target,
                attempt.generation
            );
        }
        accepted
    }

    pub fn dispose(&self) {
        self.tx.send_modify(ControllerState::dispose);
    }
}

impl Default for StatePublisher {
    fn default() -> Self {
        Self::new()
    }
}
