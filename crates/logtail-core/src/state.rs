//! Observable controller state and the result classifier.
//!
//! `ControllerState` is the latest-value view a consumer renders: the busy
//! flag, the last accepted content, the last accepted error, and whether the
//! most recent accepted attempt failed. Every mutation is keyed on the
//! session generation; attempts from an older generation never touch it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{FetchAttempt, FetchOutcome, Generation, Target};

/// Controller lifecycle phase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Polling,
    Disposed,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Polling => "polling",
            Self::Disposed => "disposed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerState {
    /// Target of the active session; `None` while idle or disposed.
    pub target: Option<Target>,
    pub generation: Generation,
    pub loading: bool,
    pub last_content: Option<String>,
    pub last_error: Option<String>,
    pub show_error: bool,
    /// Completion time of the last accepted attempt.
    pub updated_at: Option<DateTime<Utc>>,
}

impl ControllerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session (or go idle with `None`) and return its generation.
    ///
    /// A new target clears the previous target's content and error so nothing
    /// stale is displayed under the new name. Going idle keeps the last
    /// accepted values, including `loading`, for display.
    pub fn retarget(&mut self, target: Option<Target>) -> Generation {
        self.generation = self.generation.next();
        if target.is_some() {
            self.loading = true;
            self.last_content = None;
            self.last_error = None;
            self.show_error = false;
            self.updated_at = None;
        }
        self.target = target;
        self.generation
    }

    /// Mark a tick as issued. No-op for a superseded generation.
    pub fn begin_tick(&mut self, generation: Generation) -> bool {
        if generation != self.generation || self.target.is_none() {
            return false;
        }
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    /// Classify a completed attempt. Returns `true` if it was accepted.
    pub fn accept(&mut self, attempt: &FetchAttempt) -> bool {
        if self.is_stale(attempt) {
            return false;
        }
        self.loading = false;
        match &attempt.outcome {
            FetchOutcome::Success { body } => {
                self.last_content = Some(body.clone());
                self.show_error = false;
            }
            FetchOutcome::Failure { message } => {
                self.last_error = Some(message.clone());
                self.show_error = true;
            }
        }
        self.updated_at = Some(attempt.completed_at);
        true
    }

    pub fn is_stale(&self, attempt: &FetchAttempt) -> bool {
        attempt.generation != self.generation
    }

    /// Invalidate the current generation for good. Displayed values stay.
    pub fn dispose(&mut self) {
        self.generation = self.generation.next();
        self.target = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(name: &str) -> Target {
        Target::parse(name).expect("valid target")
    }

    fn polling(name: &str) -> (ControllerState, Generation) {
        let mut state = ControllerState::new();
        let generation = state.retarget(Some(target(name)));
        (state, generation)
    }

    #[test]
    fn initial_state_is_empty() {
        let state = ControllerState::new();
        assert_eq!(state.generation, Generation::ZERO);
        assert!(!state.loading);
        assert!(state.last_content.is_none());
        assert!(state.last_error.is_none());
        assert!(!state.show_error);
        assert!(state.target.is_none());
    }

    #[test]
    fn retarget_sets_loading_and_bumps_generation() {
        let (state, generation) = polling("access.log");
        assert_eq!(generation, Generation::new(1));
        assert_eq!(state.generation, generation);
        assert!(state.loading);
        assert_eq!(state.target, Some(target("access.log")));
    }

    #[test]
    fn retarget_to_none_still_bumps_generation() {
        let mut state = ControllerState::new();
        let g1 = state.retarget(None);
        let g2 = state.retarget(None);
        assert!(g1 < g2);
        assert!(!state.loading);
    }

    #[test]
    fn success_updates_content_and_clears_flag() {
        let (mut state, generation) = polling("access.log");
        let attempt = FetchAttempt::success(target("access.log"), generation, "L1\nL2");

        assert!(state.accept(&attempt));
        assert!(!state.loading);
        assert_eq!(state.last_content.as_deref(), Some("L1\nL2"));
        assert!(!state.show_error);
        assert_eq!(state.updated_at, Some(attempt.completed_at));
    }

    #[test]
    fn failure_keeps_content() {
        let (mut state, generation) = polling("access.log");
        state.accept(&FetchAttempt::success(
            target("access.log"),
            generation,
            "before",
        ));

        let failed = FetchAttempt::failure(target("access.log"), generation, "connection reset");
        assert!(state.accept(&failed));
        assert!(!state.loading);
        assert_eq!(state.last_error.as_deref(), Some("connection reset"));
        assert!(state.show_error);
        assert_eq!(state.last_content.as_deref(), Some("before"));
    }

    #[test]
    fn success_after_failure_keeps_last_error_but_hides_it() {
        let (mut state, generation) = polling("a.log");
        state.accept(&FetchAttempt::failure(target("a.log"), generation, "boom"));
        state.accept(&FetchAttempt::success(target("a.log"), generation, "ok"));

        assert!(!state.show_error);
        assert_eq!(state.last_error.as_deref(), Some("boom"));
        assert_eq!(state.last_content.as_deref(), Some("ok"));
    }

    #[test]
    fn stale_attempt_is_dropped_without_mutation() {
        let (mut state, old) = polling("a.log");
        state.retarget(Some(target("b.log")));
        let before = state.clone();

        let late = FetchAttempt::success(target("a.log"), old, "from a");
        assert!(state.is_stale(&late));
        assert!(!state.accept(&late));
        assert_eq!(state, before);
    }

    #[test]
    fn retarget_clears_previous_display() {
        let (mut state, generation) = polling("a.log");
        state.accept(&FetchAttempt::failure(target("a.log"), generation, "boom"));
        state.accept(&FetchAttempt::success(target("a.log"), generation, "text"));

        state.retarget(Some(target("b.log")));
        assert!(state.last_content.is_none());
        assert!(state.last_error.is_none());
        assert!(!state.show_error);
        assert!(state.loading);
    }

    #[test]
    fn going_idle_preserves_display_and_loading() {
        let (mut state, generation) = polling("a.log");
        state.accept(&FetchAttempt::success(target("a.log"), generation, "text"));
        state.begin_tick(generation);
        assert!(state.loading);

        state.retarget(None);
        assert!(state.target.is_none());
        assert!(state.loading, "busy flag is not reset when going idle");
        assert_eq!(state.last_content.as_deref(), Some("text"));
    }

    #[test]
    fn begin_tick_ignores_stale_generation() {
        let (mut state, old) = polling("a.log");
        let current = state.retarget(Some(target("b.log")));
        state.accept(&FetchAttempt::success(target("b.log"), current, "b"));

        assert!(!state.begin_tick(old));
        assert!(!state.loading);
        assert!(state.begin_tick(current));
        assert!(state.loading);
    }

    #[test]
    fn begin_tick_ignored_when_idle() {
        let mut state = ControllerState::new();
        let generation = state.retarget(None);
        assert!(!state.begin_tick(generation));
        assert!(!state.loading);
    }

    #[test]
    fn loading_pulse_once_per_accepted_attempt() {
        let (mut state, generation) = polling("a.log");
        for i in 0..3 {
            state.begin_tick(generation);
            assert!(state.loading);
            state.accept(&FetchAttempt::success(
                target("a.log"),
                generation,
                format!("tick {i}"),
            ));
            assert!(!state.loading);
        }
    }

    #[test]
    fn dispose_invalidates_in_flight_attempts() {
        let (mut state, generation) = polling("a.log");
        state.accept(&FetchAttempt::success(target("a.log"), generation, "kept"));
        state.dispose();

        let late = FetchAttempt::success(target("a.log"), generation, "late");
        assert!(!state.accept(&late));
        assert_eq!(state.last_content.as_deref(), Some("kept"));
        assert!(state.target.is_none());
    }

    #[test]
    fn show_error_tracks_most_recent_accepted_outcome() {
        let (mut state, generation) = polling("a.log");
        let outcomes = [true, false, false, true, false];
        for ok in outcomes {
            let attempt = if ok {
                FetchAttempt::success(target("a.log"), generation, "body")
            } else {
                FetchAttempt::failure(target("a.log"), generation, "err")
            };
            state.accept(&attempt);
            assert_eq!(state.show_error, !ok);
        }
    }

    #[test]
    fn serializes_for_json_output() {
        let (mut state, generation) = polling("a.log");
        state.accept(&FetchAttempt::success(target("a.log"), generation, "x"));
        let json = serde_json::to_value(&state).expect("serialize");
        assert_eq!(json["target"], "a.log");
        assert_eq!(json["generation"], 1);
        assert_eq!(json["loading"], false);
        assert_eq!(json["last_content"], "x");
        assert_eq!(json["show_error"], false);
    }

    #[test]
    fn phase_display() {
        assert_eq!(Phase::Idle.to_string(), "idle");
        assert_eq!(Phase::Polling.to_string(), "polling");
        assert_eq!(Phase::Disposed.to_string(), "disposed");
    }
}
