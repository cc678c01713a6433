//! Session pipeline
//!
//! One `SessionDriver::run_conversion` call per document, tracked by an
//! explicit state machine and reported as a single `SessionResult`.

pub mod driver;
pub mod result;
pub mod state;

pub use driver::SessionDriver;
pub use result::{FailureCategory, NoOpReason, Outcome, SessionResult};
pub use state::{PhaseTiming, SessionPhase, SessionState, SessionTracker};
