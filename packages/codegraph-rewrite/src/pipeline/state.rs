//! Session state machine
//!
//! ```text
//! Idle → DocumentValidated → TreeLoaded → Scanned → Resolved
//!      → Rewritten → Simplified → Persisted → Reported
//! ```
//!
//! Early exits: `Idle`/`DocumentValidated`/`TreeLoaded` and `Resolved` may jump
//! straight to `Reported` (no-op). Any non-terminal state may enter `Failed`.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::shared::models::{Result, RewriteError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    DocumentValidated,
    TreeLoaded,
    Scanned,
    Resolved,
    Rewritten,
    Simplified,
    Persisted,
    Reported,
    Failed,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::DocumentValidated => "document_validated",
            SessionState::TreeLoaded => "tree_loaded",
            SessionState::Scanned => "scanned",
            SessionState::Resolved => "resolved",
            SessionState::Rewritten => "rewritten",
            SessionState::Simplified => "simplified",
            SessionState::Persisted => "persisted",
            SessionState::Reported => "reported",
            SessionState::Failed => "failed",
        }
    }

    /// `Reported` and `Failed` absorb
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Reported | SessionState::Failed)
    }

    pub fn can_transition_to(&self, next: SessionState) -> bool {
        use SessionState::*;
        if self.is_terminal() {
            return false;
        }
        matches!(
            (self, next),
            (_, Failed)
                | (Idle, DocumentValidated)
                | (DocumentValidated, TreeLoaded)
                | (TreeLoaded, Scanned)
                | (Scanned, Resolved)
                | (Resolved, Rewritten)
                | (Rewritten, Simplified)
                | (Simplified, Persisted)
                | (Persisted, Reported)
                | (Idle, Reported)
                | (DocumentValidated, Reported)
                | (Resolved, Reported)
        )
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timed unit of work; one per forward transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Validate,
    Load,
    Scan,
    Resolve,
    Rewrite,
    Simplify,
    Persist,
}

impl SessionPhase {
    /// State entered when the phase completes
    pub fn target_state(&self) -> SessionState {
        match self {
            SessionPhase::Validate => SessionState::DocumentValidated,
            SessionPhase::Load => SessionState::TreeLoaded,
            SessionPhase::Scan => SessionState::Scanned,
            SessionPhase::Resolve => SessionState::Resolved,
            SessionPhase::Rewrite => SessionState::Rewritten,
            SessionPhase::Simplify => SessionState::Simplified,
            SessionPhase::Persist => SessionState::Persisted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseTiming {
    pub phase: SessionPhase,
    pub micros: u64,
}

impl PhaseTiming {
    pub fn duration(&self) -> Duration {
        Duration::from_micros(self.micros)
    }
}

/// Tracks the current state and per-phase wall-clock time of one session
#[derive(Debug)]
pub struct SessionTracker {
    state: SessionState,
    timings: Vec<PhaseTiming>,
    phase_started: Instant,
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionTracker {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            timings: Vec::new(),
            phase_started: Instant::now(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn timings(&self) -> &[PhaseTiming] {
        &self.timings
    }

    /// Sum of all recorded phases
    pub fn total(&self) -> Duration {
        self.timings.iter().map(PhaseTiming::duration).sum()
    }

    /// Reset the phase clock; call right before the work of a phase starts
    pub fn start_phase(&mut self) {
        self.phase_started = Instant::now();
    }

    /// Record the running phase and move to its target state
    pub fn complete(&mut self, phase: SessionPhase) -> Result<()> {
        self.record(phase);
        self.transition(phase.target_state())
    }

    /// Record the running phase without leaving the current state
    pub fn record(&mut self, phase: SessionPhase) {
        let elapsed = self.phase_started.elapsed();
        self.timings.push(PhaseTiming {
            phase,
            micros: u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
        });
        self.phase_started = Instant::now();
    }

    pub fn transition(&mut self, next: SessionState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(RewriteError::structural(format!(
                "illegal session transition {} -> {}",
                self.state, next
            )));
        }
        debug!(from = %self.state, to = %next, "session transition");
        self.state = next;
        Ok(())
    }

    /// Enter `Failed` from wherever the session is
    pub fn fail(&mut self) {
        if self.state != SessionState::Failed {
            debug!(from = %self.state, "session failed");
        }
        self.state = SessionState::Failed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::ErrorKind;

    #[test]
    fn test_happy_path_sequence() {
        let mut tracker = SessionTracker::new();
        for phase in [
            SessionPhase::Validate,
            SessionPhase::Load,
            SessionPhase::Scan,
            SessionPhase::Resolve,
            SessionPhase::Rewrite,
            SessionPhase::Simplify,
            SessionPhase::Persist,
        ] {
            tracker.start_phase();
            tracker.complete(phase).unwrap();
        }
        tracker.transition(SessionState::Reported).unwrap();
        assert_eq!(tracker.state(), SessionState::Reported);
        assert_eq!(tracker.timings().len(), 7);
    }

    #[test]
    fn test_no_op_exits() {
        assert!(SessionState::Idle.can_transition_to(SessionState::Reported));
        assert!(SessionState::Resolved.can_transition_to(SessionState::Reported));
        assert!(!SessionState::Rewritten.can_transition_to(SessionState::Reported));
    }

    #[test]
    fn test_illegal_transition_is_structural() {
        let mut tracker = SessionTracker::new();
        let err = tracker.transition(SessionState::Rewritten).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Structural);
        assert_eq!(tracker.state(), SessionState::Idle);
    }

    #[test]
    fn test_terminal_states_absorb() {
        let mut tracker = SessionTracker::new();
        tracker.fail();
        assert!(tracker.transition(SessionState::DocumentValidated).is_err());
        assert!(!SessionState::Reported.can_transition_to(SessionState::Failed));
    }
}
