//! Session boundary behavior: no-ops, failures and partial synthesis

#[path = "../common/mod.rs"]
mod common;

use std::path::Path;
use std::sync::Arc;

use codegraph_rewrite::config::RewriteConfig;
use codegraph_rewrite::features::persistence::DocumentSink;
use codegraph_rewrite::features::semantic::SemanticProvider;
use codegraph_rewrite::features::type_resolution::SkipReason;
use codegraph_rewrite::pipeline::{FailureCategory, NoOpReason, Outcome, SessionPhase, SessionState};
use codegraph_rewrite::{JavaProvider, SessionDriver};
use common::fakes::{DuplicatingProvider, MemorySink, RejectingSink, TamperingProvider, UnavailableProvider};
use common::*;

fn driver_with(provider: Arc<dyn SemanticProvider>, sink: Arc<dyn DocumentSink>) -> SessionDriver {
    SessionDriver::new(provider, sink, RewriteConfig::default().build().unwrap())
}

const NOT_APPLICABLE: Outcome = Outcome::NoOp {
    reason: NoOpReason::NotApplicable,
};

// ═══════════════════════════════════════════════════════════════════════════
// Scenario D: one unparseable spelling among ten sites
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn scenario_d_tenth_site_is_skipped() {
    let project = JavaProject::new();
    let path = project.file("D.java", &fixture_n_int_vars("D", 10));
    let sink = Arc::new(MemorySink::default());
    let driver = driver_with(Arc::new(TamperingProvider::unparseable_at(9)), sink.clone());

    let result = driver.run_conversion(Some(&path)).await;

    assert_eq!(result.outcome, Outcome::Success);
    assert_eq!(result.count, 9);
    assert_eq!(result.skipped.len(), 1);
    assert_eq!(result.skipped[0].reason, SkipReason::Synthesis);

    let expected: Vec<String> = (0..9)
        .map(|i| format!("int v{i} = {i};"))
        .chain(std::iter::once("var v9 = 9;".to_string()))
        .collect();
    let expected: Vec<&str> = expected.iter().map(String::as_str).collect();
    let written = sink.written();
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].1, fixture_method_body("D", &expected));
}

// ═══════════════════════════════════════════════════════════════════════════
// Not applicable
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn unsupported_extension_is_not_applicable() {
    let project = JavaProject::new();
    let path = project.file("notes.txt", "var x = 1;");
    let sink = Arc::new(MemorySink::default());

    let result = driver_with(Arc::new(JavaProvider::new()), sink.clone())
        .run_conversion(Some(&path))
        .await;

    assert_eq!(result.outcome, NOT_APPLICABLE);
    assert_eq!(result.message, "The active document is not a valid Java file.");
    assert_eq!(result.final_state, SessionState::Reported);
    assert!(result.final_text.is_none());
    assert!(sink.written().is_empty());
}

#[tokio::test]
async fn missing_file_is_not_applicable() {
    let result = driver_with(Arc::new(JavaProvider::new()), Arc::new(MemorySink::default()))
        .run_conversion(Some(Path::new("/definitely/not/here/A.java")))
        .await;
    assert_eq!(result.outcome, NOT_APPLICABLE);
}

#[tokio::test]
async fn file_outside_project_is_not_applicable() {
    let project = JavaProject::new();
    let elsewhere = JavaProject::new();
    let path = elsewhere.file("A.java", &fixture_n_int_vars("A", 1));
    let config = RewriteConfig::default()
        .project_root(project.dir.path())
        .build()
        .unwrap();
    let driver = SessionDriver::new(Arc::new(JavaProvider::new()), Arc::new(MemorySink::default()), config);

    let result = driver.run_conversion(Some(&path)).await;

    assert_eq!(result.outcome, NOT_APPLICABLE);
    assert!(result.elapsed_of(SessionPhase::Load).is_some());
    assert_eq!(elsewhere.read("A.java"), fixture_n_int_vars("A", 1));
}

// ═══════════════════════════════════════════════════════════════════════════
// Failures
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn provider_outage_is_an_environment_failure() {
    let project = JavaProject::new();
    let path = project.file("A.java", &fixture_n_int_vars("A", 1));

    let result = driver_with(Arc::new(UnavailableProvider), Arc::new(MemorySink::default()))
        .run_conversion(Some(&path))
        .await;

    assert_eq!(
        result.outcome,
        Outcome::Failure {
            category: FailureCategory::Environment
        }
    );
    assert_eq!(result.final_state, SessionState::Failed);
    assert!(result.message.contains("workspace service unavailable"));
}

#[tokio::test]
async fn syntax_errors_fail_the_load() {
    let project = JavaProject::new();
    let path = project.file("A.java", "class A { void f() { var x = ; } }\n");

    let result = driver_with(Arc::new(JavaProvider::new()), Arc::new(MemorySink::default()))
        .run_conversion(Some(&path))
        .await;

    assert!(result.outcome.is_failure());
    assert_eq!(result.count, 0);
}

#[tokio::test]
async fn write_failure_keeps_in_memory_result() {
    let project = JavaProject::new();
    let source = fixture_n_int_vars("A", 2);
    let path = project.file("A.java", &source);

    let result = driver_with(Arc::new(JavaProvider::new()), Arc::new(RejectingSink))
        .run_conversion(Some(&path))
        .await;

    assert_eq!(
        result.outcome,
        Outcome::Failure {
            category: FailureCategory::Io
        }
    );
    assert_eq!(result.final_state, SessionState::Failed);
    assert_eq!(result.count, 2);
    assert_eq!(
        result.final_text.as_deref(),
        Some(fixture_method_body("A", &["int v0 = 0;", "int v1 = 1;"]).as_str())
    );
    assert!(result.elapsed_of(SessionPhase::Persist).is_some());
    assert!(result.message.contains("read-only"));
    assert_eq!(project.read("A.java"), source);
}

#[tokio::test]
async fn repeated_slots_fail_before_anything_is_written() {
    let project = JavaProject::new();
    let source = fixture_n_int_vars("A", 2);
    let path = project.file("A.java", &source);
    let sink = Arc::new(MemorySink::default());

    let result = driver_with(Arc::new(DuplicatingProvider::default()), sink.clone())
        .run_conversion(Some(&path))
        .await;

    assert_eq!(
        result.outcome,
        Outcome::Failure {
            category: FailureCategory::Structural
        }
    );
    assert_eq!(result.final_state, SessionState::Failed);
    assert!(result.message.contains("overlap"), "{}", result.message);
    assert_eq!(result.count, 0);
    assert!(result.final_text.is_none());
    assert!(result.elapsed_of(SessionPhase::Persist).is_none());
    assert!(sink.written().is_empty());
    assert_eq!(project.read("A.java"), source);
}

#[tokio::test]
async fn result_serializes_for_the_cli() {
    let result = driver_with(Arc::new(JavaProvider::new()), Arc::new(MemorySink::default()))
        .run_conversion(None)
        .await;
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["outcome"]["status"], "no_op");
    assert_eq!(json["outcome"]["reason"], "not_applicable");
    assert_eq!(json["final_state"], "reported");
}
