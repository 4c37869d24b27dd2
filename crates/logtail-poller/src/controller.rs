//! TailController: the target watcher.
//!
//! Holds at most one `PollSession`. Every `set_target` call tears the current
//! session down (aborting its timer and bumping the generation) before a new
//! one is started, so two timers never run for the same controller.

use std::sync::Arc;

use logtail_core::{ControllerState, Generation, Period, Phase, Target};
use logtail_http::LogSource;
use tokio::sync::watch;

use crate::error::ControllerError;
use crate::publisher::StatePublisher;
use crate::session::PollSession;

pub struct TailController {
    source: Arc<dyn LogSource>,
    period: Period,
    publisher: StatePublisher,
    session: Option<PollSession>,
    disposed: bool,
}

impl TailController {
    pub fn new(source: Arc<dyn LogSource>, period: Period) -> Self {
        Self {
            source,
            period,
            publisher: StatePublisher::new(),
            session: None,
            disposed: false,
        }
    }

    /// Switch to `target`, or go idle with `None`.
    ///
    /// An empty or whitespace-only name counts as `None`. Must be called from
    /// within a Tokio runtime when a target is given.
    pub fn set_target(&mut self, target: Option<&str>) -> Result<(), ControllerError> {
        self.set_target_with_period(target, self.period)
    }

    /// Like [`set_target`](Self::set_target), also replacing the tick period.
    pub fn set_target_with_period(
        &mut self,
        target: Option<&str>,
        period: Period,
    ) -> Result<(), ControllerError> {
        if self.disposed {
            return Err(ControllerError::Disposed);
        }

        // Validate first: a rejected name leaves the running session alone.
        let target = match target.map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(Target::parse(raw)?),
        };

        self.teardown();
        self.period = period;

        let generation = self.publisher.retarget(target.clone());
        match target {
            Some(target) => {
                self.session = Some(PollSession::start(
                    target,
                    generation,
                    period,
                    Arc::clone(&self.source),
                    self.publisher.clone(),
                ));
            }
            None => tracing::debug!("controller idle at {generation}"),
        }
        Ok(())
    }

    /// Stop polling for good. Calling it again is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.teardown();
        self.publisher.dispose();
        self.disposed = true;
        tracing::debug!("controller disposed");
    }

    fn teardown(&mut self) {
        if let Some(session) = self.session.take() {
            drop(session);
        }
    }

    pub fn phase(&self) -> Phase {
        if self.disposed {
            Phase::Disposed
        } else if self.session.is_some() {
            Phase::Polling
        } else {
            Phase::Idle
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.publisher.subscribe()
    }

    pub fn state(&self) -> ControllerState {
        self.publisher.snapshot()
    }

    pub fn generation(&self) -> Generation {
        self.publisher.generation()
    }

    pub fn target(&self) -> Option<&Target> {
        self.session.as_ref().map(PollSession::target)
    }

    pub fn period(&self) -> Period {
        self.period
    }
}

impl std::fmt::Debug for TailController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TailController")
            .field("period", &self.period)
            .field("session", &self.session)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl Drop for TailController {
    fn drop(&mut self) {
        self.dispose();
    }
}
