//! Name simplification through a full session
//!
//! Dry-run sessions; the simplified text is read from the result.

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;

use codegraph_rewrite::config::{Preset, RewriteConfig};
use codegraph_rewrite::pipeline::{Outcome, SessionResult};
use codegraph_rewrite::{JavaProvider, SessionDriver};
use common::fakes::MemorySink;
use common::*;
use pretty_assertions::assert_eq;

async fn convert(preset: Preset, name: &str, source: &str) -> SessionResult {
    let project = JavaProject::new();
    let path = project.file(name, source);
    let sink = Arc::new(MemorySink::default());
    let config = RewriteConfig::preset(preset).dry_run(true).build().unwrap();
    let driver = SessionDriver::new(Arc::new(JavaProvider::new()), sink.clone(), config);

    let result = driver.run_conversion(Some(&path)).await;
    assert_eq!(result.outcome, Outcome::Success, "{}", result.message);
    assert!(sink.written().is_empty());
    assert_eq!(project.read(name), source);
    result
}

fn text(result: &SessionResult) -> &str {
    result.final_text.as_deref().unwrap_or_default()
}

const EMPTY_MAP: &str =
    "package demo;\n\nclass M {\n    void run() {\n        var m = java.util.Collections.emptyMap();\n    }\n}\n";

// ═══════════════════════════════════════════════════════════════════════════
// Presets
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn minimal_keeps_fully_qualified_names() {
    let result = convert(Preset::Minimal, "M.java", &fixture_method_body("M", &["var s = \"a\";"])).await;
    assert_eq!(text(&result), fixture_method_body("M", &["java.lang.String s = \"a\";"]));
}

#[tokio::test]
async fn conservative_shortens_without_imports() {
    let result = convert(Preset::Conservative, "M.java", EMPTY_MAP).await;
    assert_eq!(
        text(&result),
        "package demo;\n\nclass M {\n    void run() {\n        java.util.Map<Object, Object> m = java.util.Collections.emptyMap();\n    }\n}\n"
    );
    assert!(result.imports_added.is_empty());
}

#[tokio::test]
async fn balanced_adds_import_after_package() {
    let result = convert(Preset::Balanced, "M.java", EMPTY_MAP).await;
    assert_eq!(
        text(&result),
        "package demo;\n\nimport java.util.Map;\n\nclass M {\n    void run() {\n        Map<Object, Object> m = java.util.Collections.emptyMap();\n    }\n}\n"
    );
    assert_eq!(result.imports_added, vec!["java.util.Map".to_string()]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Scope-sensitive decisions
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn import_goes_after_existing_imports() {
    let result = convert(
        Preset::Balanced,
        "M.java",
        "import com.acme.*;\n\nclass M {\n    void run() {\n        var m = java.util.Collections.emptyMap();\n    }\n}\n",
    )
    .await;
    // An unknown on-demand package may declare Object too
    assert_eq!(
        text(&result),
        "import com.acme.*;\nimport java.util.Map;\n\nclass M {\n    void run() {\n        Map<java.lang.Object, java.lang.Object> m = java.util.Collections.emptyMap();\n    }\n}\n"
    );
}

#[tokio::test]
async fn name_written_elsewhere_blocks_import() {
    let result = convert(
        Preset::Balanced,
        "M.java",
        "class M {\n    void take(Map other) {}\n    void run() {\n        var m = java.util.Collections.emptyMap();\n    }\n}\n",
    )
    .await;
    assert_eq!(
        text(&result),
        "class M {\n    void take(Map other) {}\n    void run() {\n        java.util.Map<Object, Object> m = java.util.Collections.emptyMap();\n    }\n}\n"
    );
    assert!(result.imports_added.is_empty());
}

#[tokio::test]
async fn local_class_keeps_java_lang_qualified() {
    let result = convert(
        Preset::Balanced,
        "M.java",
        &fixture_method_body("M", &["class String {}", "var s = \"x\";"]),
    )
    .await;
    assert_eq!(
        text(&result),
        fixture_method_body("M", &["class String {}", "java.lang.String s = \"x\";"])
    );
}

#[tokio::test]
async fn member_type_shortens_to_simple_name() {
    let result = convert(
        Preset::Balanced,
        "M.java",
        "package app;\n\nclass M {\n    static class Node {}\n    void run() {\n        var n = new Node();\n    }\n}\n",
    )
    .await;
    assert_eq!(
        text(&result),
        "package app;\n\nclass M {\n    static class Node {}\n    void run() {\n        Node n = new Node();\n    }\n}\n"
    );
}

#[tokio::test]
async fn crlf_files_get_crlf_imports() {
    let result = convert(
        Preset::Balanced,
        "M.java",
        "package demo;\r\n\r\nclass M {\r\n    void run() {\r\n        var m = java.util.Collections.emptyMap();\r\n    }\r\n}\r\n",
    )
    .await;
    assert_eq!(
        text(&result),
        "package demo;\r\n\r\nimport java.util.Map;\r\n\r\nclass M {\r\n    void run() {\r\n        Map<Object, Object> m = java.util.Collections.emptyMap();\r\n    }\r\n}\r\n"
    );
}
