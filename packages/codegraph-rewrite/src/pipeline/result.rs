//! Session result types
//!
//! One `SessionResult` per `run_conversion` call; serializable for the CLI.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::state::{PhaseTiming, SessionState};
use crate::features::type_resolution::SkippedSite;
use crate::shared::models::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoOpReason {
    /// No active document, unsupported file, or no compilation context
    NotApplicable,
    /// The document has no replaceable declaration
    NothingToDo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    Environment,
    Structural,
    Io,
}

impl From<ErrorKind> for FailureCategory {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::IO => FailureCategory::Io,
            ErrorKind::Structural | ErrorKind::Synthesis | ErrorKind::Internal => {
                FailureCategory::Structural
            }
            ErrorKind::Environment
            | ErrorKind::Validation
            | ErrorKind::Parse
            | ErrorKind::Config => FailureCategory::Environment,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Success,
    NoOp { reason: NoOpReason },
    Failure { category: FailureCategory },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    pub fn is_no_op(&self) -> bool {
        matches!(self, Outcome::NoOp { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure { .. })
    }
}

/// Terminal report of one conversion session
#[derive(Debug, Clone, Serialize)]
pub struct SessionResult {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub path: Option<PathBuf>,
    /// Sites rewritten
    pub count: usize,
    /// Rewritten text; the original text on `nothing_to_do`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_text: Option<String>,
    pub timings: Vec<PhaseTiming>,
    pub outcome: Outcome,
    pub message: String,
    pub final_state: SessionState,
    pub skipped: Vec<SkippedSite>,
    pub imports_added: Vec<String>,
}

impl SessionResult {
    pub fn total_elapsed(&self) -> Duration {
        self.timings.iter().map(PhaseTiming::duration).sum()
    }

    pub fn elapsed_of(&self, phase: super::state::SessionPhase) -> Option<Duration> {
        self.timings
            .iter()
            .find(|t| t.phase == phase)
            .map(PhaseTiming::duration)
    }

    /// Compact one-line form for text output
    pub fn summary_line(&self) -> String {
        let path = self
            .path
            .as_ref()
            .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());
        let status = match self.outcome {
            Outcome::Success => "ok".to_string(),
            Outcome::NoOp { reason } => match reason {
                NoOpReason::NotApplicable => "skip (not applicable)".to_string(),
                NoOpReason::NothingToDo => "skip (nothing to do)".to_string(),
            },
            Outcome::Failure { category } => format!("FAILED ({:?})", category).to_lowercase(),
        };
        format!("{}: {} [{} replaced]", path, status, self.count)
    }
}
