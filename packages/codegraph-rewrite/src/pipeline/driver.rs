//! Session driver
//!
//! Runs one conversion from the active document to a `SessionResult`:
//! validate → load → scan → resolve → rewrite → simplify → persist → report.
//! Errors never cross `run_conversion`; they end up in the result's outcome.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::result::{FailureCategory, NoOpReason, Outcome, SessionResult};
use super::state::{SessionPhase, SessionState, SessionTracker};
use crate::config::ValidatedConfig;
use crate::features::declaration_scan::DeclarationScanner;
use crate::features::persistence::DocumentSink;
use crate::features::rewrite::{RewritePlan, TreeRewriter};
use crate::features::semantic::SemanticProvider;
use crate::features::simplification::{strip_annotations, NameSimplifier, SimplifiedUnit};
use crate::features::type_resolution::{SkippedSite, TypeResolver};
use crate::shared::models::{Result, RewriteError};

pub struct SessionDriver {
    provider: Arc<dyn SemanticProvider>,
    sink: Arc<dyn DocumentSink>,
    config: ValidatedConfig,
}

/// Mutable scratch state of one run, frozen into a `SessionResult`
struct Session {
    id: Uuid,
    started_at: chrono::DateTime<Utc>,
    path: Option<PathBuf>,
    tracker: SessionTracker,
    count: usize,
    final_text: Option<String>,
    outcome: Option<Outcome>,
    message: String,
    skipped: Vec<SkippedSite>,
    imports_added: Vec<String>,
}

impl Session {
    fn start(path: Option<&Path>) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            path: path.map(Path::to_path_buf),
            tracker: SessionTracker::new(),
            count: 0,
            final_text: None,
            outcome: None,
            message: String::new(),
            skipped: Vec::new(),
            imports_added: Vec::new(),
        }
    }

    fn report(&mut self, outcome: Outcome, message: String) -> Result<()> {
        self.tracker.transition(SessionState::Reported)?;
        self.outcome = Some(outcome);
        self.message = message;
        Ok(())
    }

    fn fail(&mut self, err: &RewriteError) {
        let category = FailureCategory::from(err.kind);
        self.tracker.fail();
        self.outcome = Some(Outcome::Failure { category });
        self.message = format!("Conversion failed: {}", err);
    }

    fn finish(self) -> SessionResult {
        SessionResult {
            session_id: self.id,
            started_at: self.started_at,
            path: self.path,
            count: self.count,
            final_text: self.final_text,
            timings: self.tracker.timings().to_vec(),
            outcome: self.outcome.unwrap_or(Outcome::Failure {
                category: FailureCategory::Structural,
            }),
            message: self.message,
            final_state: self.tracker.state(),
            skipped: self.skipped,
            imports_added: self.imports_added,
        }
    }
}

impl SessionDriver {
    pub fn new(
        provider: Arc<dyn SemanticProvider>,
        sink: Arc<dyn DocumentSink>,
        config: ValidatedConfig,
    ) -> Self {
        Self {
            provider,
            sink,
            config,
        }
    }

    pub fn config(&self) -> &ValidatedConfig {
        &self.config
    }

    /// Convert every replaceable implicit declaration of `active_file`
    pub async fn run_conversion(&self, active_file: Option<&Path>) -> SessionResult {
        let mut session = Session::start(active_file);
        debug!(session = %session.id, path = ?active_file, "conversion session started");

        if let Err(err) = self.drive(&mut session, active_file).await {
            warn!(session = %session.id, error = %err, "conversion session failed");
            session.fail(&err);
        }

        let result = session.finish();
        info!(
            session = %result.session_id,
            path = ?result.path,
            outcome = ?result.outcome,
            count = result.count,
            elapsed_ms = result.total_elapsed().as_millis() as u64,
            "conversion session finished"
        );
        result
    }

    async fn drive(&self, session: &mut Session, active_file: Option<&Path>) -> Result<()> {
        let language = self.provider.language();
        let placeholder = language.placeholder_keyword();

        // Validate
        session.tracker.start_phase();
        let path = match active_file {
            Some(path) if path.is_file() && self.provider.supports(path) => path,
            _ => {
                session.tracker.record(SessionPhase::Validate);
                return session.report(
                    Outcome::NoOp {
                        reason: NoOpReason::NotApplicable,
                    },
                    format!("The active document is not a valid {} file.", language.display_name()),
                );
            }
        };
        session.tracker.complete(SessionPhase::Validate)?;

        // Load
        let loaded = self
            .provider
            .load_compilation_unit(path, &self.config.project_context())
            .await;
        session.tracker.record(SessionPhase::Load);
        let document = match loaded {
            Ok(document) => document,
            Err(err) if err.is_missing_context() => {
                debug!(path = %path.display(), "no compilation context");
                return session.report(
                    Outcome::NoOp {
                        reason: NoOpReason::NotApplicable,
                    },
                    format!(
                        "The active document does not belong to a {} project.",
                        language.display_name()
                    ),
                );
            }
            Err(err) => return Err(err.into()),
        };
        session.tracker.transition(SessionState::TreeLoaded)?;
        let unit = document.unit;
        let model = document.model;

        // Scan
        session.tracker.start_phase();
        let sites: Vec<_> = DeclarationScanner::for_language(unit.language())
            .scan(unit.root())
            .collect();
        session.tracker.complete(SessionPhase::Scan)?;

        // Resolve
        session.tracker.start_phase();
        let resolution = TypeResolver::for_unit(&unit).resolve(&unit, model.as_ref(), sites.iter().copied());
        session.skipped = resolution.skipped.clone();
        session.tracker.complete(SessionPhase::Resolve)?;
        debug!(
            sites = sites.len(),
            accepted = resolution.candidates.len(),
            skipped = resolution.skipped.len(),
            "sites resolved"
        );

        if resolution.is_empty() {
            session.final_text = Some(self.provider.render_text(&unit));
            return session.report(
                Outcome::NoOp {
                    reason: NoOpReason::NothingToDo,
                },
                format!("No replaceable '{}' declarations were found.", placeholder),
            );
        }

        // Rewrite
        session.tracker.start_phase();
        let plan = RewritePlan::from_resolution(&resolution)?;
        let rewritten = TreeRewriter::new().apply(&unit, &plan)?;
        session.tracker.complete(SessionPhase::Rewrite)?;

        // Simplify
        session.tracker.start_phase();
        let simplifier = NameSimplifier::new(self.config.simplify_options());
        let simplified = match simplifier.simplify(rewritten.clone(), Arc::clone(&model)).await {
            Ok(simplified) => simplified,
            Err(err) => {
                warn!(error = %err, "simplification failed; keeping fully-qualified names");
                SimplifiedUnit {
                    unit: strip_annotations(&rewritten),
                    imports_added: Vec::new(),
                    names_shortened: 0,
                }
            }
        };
        session.tracker.complete(SessionPhase::Simplify)?;

        let text = self.provider.render_text(&simplified.unit);
        session.count = plan.len();
        session.final_text = Some(text);
        session.imports_added = simplified.imports_added;

        // Persist
        session.tracker.start_phase();
        let written = match (&session.final_text, self.config.dry_run()) {
            (_, true) => {
                debug!(path = %path.display(), "dry run; document not written");
                Ok(())
            }
            (Some(text), false) => self.sink.write_document(path, text).await,
            (None, false) => Ok(()),
        };
        session.tracker.record(SessionPhase::Persist);
        written.map_err(RewriteError::from)?;
        session.tracker.transition(SessionState::Persisted)?;

        let elapsed = session.tracker.total();
        let message = format!(
            "{} '{}' declarations replaced.\nElapsed: {}ms",
            session.count,
            placeholder,
            elapsed.as_millis()
        );
        session.report(Outcome::Success, message)
    }
}
