//! Java provider semantics
//!
//! Types inferred for `var` slots and type-name binding, checked through the
//! public provider port.

#[path = "../common/mod.rs"]
mod common;

use std::path::Path;

use codegraph_rewrite::features::declaration_scan::scan;
use codegraph_rewrite::features::semantic::{
    JavaProvider, LoadedDocument, NameBinding, ProjectContext, SemanticProvider, TypeKind, TypeSymbol,
};
use common::*;

async fn load(path: &Path) -> LoadedDocument {
    JavaProvider::new()
        .load_compilation_unit(path, &ProjectContext::default())
        .await
        .expect("load compilation unit")
}

async fn var_symbols(source: &str) -> Vec<TypeSymbol> {
    let project = JavaProject::new();
    let path = project.file("M.java", source);
    let document = load(&path).await;
    scan(&document.unit)
        .map(|site| {
            document
                .model
                .type_of(site.slot_id())
                .unwrap_or_else(TypeSymbol::unknown)
        })
        .collect()
}

async fn var_spellings(source: &str) -> Vec<String> {
    var_symbols(source)
        .await
        .into_iter()
        .map(|symbol| symbol.fully_qualified)
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Types declared in the unit
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn enum_constants_and_helpers() {
    let types = var_spellings(
        "enum Color { RED, GREEN }\nclass M { void run() { var c = Color.RED; var all = Color.values(); var i = c.ordinal(); } }\n",
    )
    .await;
    assert_eq!(types, vec!["Color", "Color[]", "int"]);
}

#[tokio::test]
async fn record_accessors() {
    let types = var_spellings(
        "record Point(int x, int y) {}\nclass M { void run() { var p = new Point(1, 2); var x = p.x(); } }\n",
    )
    .await;
    assert_eq!(types, vec!["Point", "int"]);
}

#[tokio::test]
async fn generic_class_members_are_substituted() {
    let types = var_spellings(
        "class Box<T> { T value; T get() { return value; } }\nclass M { void run() { var b = new Box<String>(); var v = b.get(); } }\n",
    )
    .await;
    assert_eq!(types, vec!["Box<java.lang.String>", "java.lang.String"]);
}

#[tokio::test]
async fn packaged_member_type() {
    let types = var_spellings(
        "package app;\n\nclass M {\n    static class Node {}\n    void run() { var n = new Node(); }\n}\n",
    )
    .await;
    assert_eq!(types, vec!["app.M.Node"]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Expressions
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn operators_promote() {
    let types = var_spellings(
        "class M { void run(boolean flag, int n) { var t = flag ? 1 : 2L; var s = \"a\" + n; var d = n * 1.5; var b = n > 2; } }\n",
    )
    .await;
    assert_eq!(types, vec!["long", "java.lang.String", "double", "boolean"]);
}

#[tokio::test]
async fn jdk_catalog_calls() {
    let types = var_spellings(
        "import java.util.List;\nclass M { void run() { var xs = List.of(1, 2); var first = xs.get(0); var sb = new StringBuilder().append(\"x\"); } }\n",
    )
    .await;
    assert_eq!(
        types,
        vec!["java.util.List<java.lang.Integer>", "java.lang.Integer", "java.lang.StringBuilder"]
    );
}

#[tokio::test]
async fn untypeable_initializers() {
    let kinds: Vec<TypeKind> = var_symbols(
        "class M { void run() { var f = () -> 1; var n = null; var y = new Object() { }; var u = unknownCall(); } }\n",
    )
    .await
    .into_iter()
    .map(|symbol| symbol.kind)
    .collect();
    assert_eq!(
        kinds,
        vec![TypeKind::Error, TypeKind::Error, TypeKind::Anonymous, TypeKind::Unknown]
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Name binding
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn same_package_siblings_bind() {
    let project = JavaProject::new();
    project.file("Helper.java", "package app;\nclass Helper {}\n");
    let path = project.file(
        "Main.java",
        "package app;\nclass Main { void run() { var h = new Helper(); } }\n",
    );

    let document = load(&path).await;
    let slot = scan(&document.unit).next().unwrap().slot_id();
    assert_eq!(
        document.model.type_of(slot).unwrap().fully_qualified,
        "app.Helper"
    );
    assert_eq!(
        document.model.bind_type_name("Helper", slot),
        NameBinding::Type("app.Helper".into())
    );
}

#[tokio::test]
async fn unknown_on_demand_package_is_ambiguous() {
    let project = JavaProject::new();
    let path = project.file(
        "M.java",
        "import java.util.*;\nimport com.acme.*;\nclass M { void run() { var x = 1; } }\n",
    );

    let document = load(&path).await;
    let slot = scan(&document.unit).next().unwrap().slot_id();
    assert_eq!(document.model.bind_type_name("List", slot), NameBinding::Ambiguous);
    assert_eq!(document.model.bind_type_name("Nope", slot), NameBinding::Unbound);
}

#[tokio::test]
async fn local_class_shadows_java_lang() {
    let project = JavaProject::new();
    let path = project.file(
        "M.java",
        "class M { void run() { class String {} var s = \"x\"; } }\n",
    );

    let document = load(&path).await;
    let slot = scan(&document.unit).next().unwrap().slot_id();
    assert_eq!(
        document.model.type_of(slot).unwrap().fully_qualified,
        "java.lang.String"
    );
    assert_eq!(
        document.model.bind_type_name("String", slot),
        NameBinding::Type("String".into())
    );
}
