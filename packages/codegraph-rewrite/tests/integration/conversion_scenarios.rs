//! End-to-end conversion scenarios
//!
//! Real Java provider, files on disk, one driver session per document.

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use codegraph_rewrite::config::{Preset, RewriteConfig};
use codegraph_rewrite::pipeline::{NoOpReason, Outcome, SessionPhase, SessionState};
use codegraph_rewrite::{FileSystemSink, JavaProvider, SessionDriver};
use common::*;
use pretty_assertions::assert_eq;

fn driver() -> SessionDriver {
    SessionDriver::new(
        Arc::new(JavaProvider::new()),
        Arc::new(FileSystemSink::new()),
        RewriteConfig::preset(Preset::Balanced).build().unwrap(),
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// Scenario A: primitive and reference types
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn scenario_a_primitive_and_string() {
    let project = JavaProject::new();
    let path = project.file(
        "A.java",
        "class A {\n    void run() {\n        var x = 5;\n        var s = \"a\";\n    }\n}\n",
    );

    let result = driver().run_conversion(Some(&path)).await;

    assert_eq!(result.outcome, Outcome::Success);
    assert_eq!(result.count, 2);
    assert_eq!(result.final_state, SessionState::Reported);
    assert!(result.message.starts_with("2 'var' declarations replaced.\nElapsed: "));
    assert!(result.imports_added.is_empty());
    assert_eq!(
        project.read("A.java"),
        "class A {\n    void run() {\n        int x = 5;\n        String s = \"a\";\n    }\n}\n"
    );
    assert_eq!(result.final_text.as_deref(), Some(project.read("A.java").as_str()));
}

#[tokio::test]
async fn scenario_a_reports_every_phase() {
    let project = JavaProject::new();
    let path = project.file("A.java", &fixture_n_int_vars("A", 3));

    let result = driver().run_conversion(Some(&path)).await;

    let phases: Vec<SessionPhase> = result.timings.iter().map(|t| t.phase).collect();
    assert_eq!(
        phases,
        vec![
            SessionPhase::Validate,
            SessionPhase::Load,
            SessionPhase::Scan,
            SessionPhase::Resolve,
            SessionPhase::Rewrite,
            SessionPhase::Simplify,
            SessionPhase::Persist,
        ]
    );
    assert_eq!(result.count, 3);
}

// ═══════════════════════════════════════════════════════════════════════════
// Scenario B: anonymous class stays untouched
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn scenario_b_anonymous_class_is_a_no_op() {
    let project = JavaProject::new();
    let source = fixture_method_body("B", &["var y = new Object() { int a = 1; };"]);
    let path = project.file("B.java", &source);

    let result = driver().run_conversion(Some(&path)).await;

    assert_eq!(result.count, 0);
    assert_eq!(
        result.outcome,
        Outcome::NoOp {
            reason: NoOpReason::NothingToDo
        }
    );
    assert_eq!(result.message, "No replaceable 'var' declarations were found.");
    assert_eq!(result.final_text.as_deref(), Some(source.as_str()));
    assert_eq!(project.read("B.java"), source);
    assert_eq!(result.skipped.len(), 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// Safety and formatting
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn only_concrete_types_are_written() {
    let project = JavaProject::new();
    let path = project.file(
        "C.java",
        &fixture_method_body("C", &["var a = 1;", "var n = null;", "var u = missing();"]),
    );

    let result = driver().run_conversion(Some(&path)).await;

    assert_eq!(result.count, 1);
    assert_eq!(result.skipped.len(), 2);
    assert_eq!(
        project.read("C.java"),
        fixture_method_body("C", &["int a = 1;", "var n = null;", "var u = missing();"])
    );
}

#[tokio::test]
async fn comments_and_spacing_survive() {
    let project = JavaProject::new();
    let path = project.file(
        "D.java",
        &fixture_method_body("D", &["var /* keep */ x = 5;  // trailing", "var\ty = 2L;"]),
    );

    driver().run_conversion(Some(&path)).await;

    assert_eq!(
        project.read("D.java"),
        fixture_method_body("D", &["int /* keep */ x = 5;  // trailing", "long\ty = 2L;"])
    );
}

#[tokio::test]
async fn enhanced_for_and_resources() {
    let project = JavaProject::new();
    let path = project.file(
        "E.java",
        "import java.io.FileInputStream;\n\nclass E {\n    void run() throws Exception {\n        for (var s : java.util.List.of(\"a\", \"b\")) {\n        }\n        try (var in = new FileInputStream(\"data.bin\")) {\n        }\n    }\n}\n",
    );

    let result = driver().run_conversion(Some(&path)).await;

    assert_eq!(result.count, 2);
    assert_eq!(
        project.read("E.java"),
        "import java.io.FileInputStream;\n\nclass E {\n    void run() throws Exception {\n        for (String s : java.util.List.of(\"a\", \"b\")) {\n        }\n        try (FileInputStream in = new FileInputStream(\"data.bin\")) {\n        }\n    }\n}\n"
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Idempotence
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn second_run_changes_nothing() {
    let project = JavaProject::new();
    let path = project.file(
        "F.java",
        "import java.util.ArrayList;\n\nclass F {\n    void run() {\n        var xs = new ArrayList<String>();\n        var n = xs.size();\n    }\n}\n",
    );

    let first = driver().run_conversion(Some(&path)).await;
    assert_eq!(first.outcome, Outcome::Success);
    let after_first = project.read("F.java");
    assert_eq!(
        after_first,
        "import java.util.ArrayList;\n\nclass F {\n    void run() {\n        ArrayList<String> xs = new ArrayList<String>();\n        int n = xs.size();\n    }\n}\n"
    );

    let second = driver().run_conversion(Some(&path)).await;
    assert_eq!(second.count, 0);
    assert_eq!(
        second.outcome,
        Outcome::NoOp {
            reason: NoOpReason::NothingToDo
        }
    );
    assert_eq!(project.read("F.java"), after_first);
}

#[tokio::test]
async fn session_ids_are_unique() {
    let project = JavaProject::new();
    let path = project.file("G.java", &fixture_n_int_vars("G", 1));
    let driver = driver();

    let first = driver.run_conversion(Some(&path)).await;
    let second = driver.run_conversion(Some(&path)).await;
    assert_ne!(first.session_id, second.session_id);
}
