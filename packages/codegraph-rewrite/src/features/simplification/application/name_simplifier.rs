//! Name simplification over marked replacement nodes
//!
//! Every qualified name inside a node carrying a `Simplify` marker is cut to
//! the shortest suffix whose head still binds to the same type at the slot
//! the node replaced. Names with no binding suffix get an import when that
//! cannot change the meaning of anything else in the file.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info};

use crate::features::semantic::{NameBinding, SemanticModel};
use crate::features::simplification::domain::{insert_imports, SimplifiedUnit, SimplifyOptions};
use crate::features::syntax::{
    parse_type_name, CompilationUnit, NodeId, NodeIdAllocator, SyntaxElement, SyntaxKind, SyntaxNode,
};
use crate::shared::models::{Result, RewriteError};

pub struct NameSimplifier {
    options: SimplifyOptions,
}

impl NameSimplifier {
    pub fn new(options: SimplifyOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> SimplifyOptions {
        self.options
    }

    /// Simplify `unit` on a blocking task
    pub async fn simplify(
        &self,
        unit: CompilationUnit,
        model: Arc<dyn SemanticModel>,
    ) -> Result<SimplifiedUnit> {
        if !self.options.enabled {
            return Ok(SimplifiedUnit {
                unit: strip_annotations(&unit),
                imports_added: Vec::new(),
                names_shortened: 0,
            });
        }
        let options = self.options;
        tokio::task::spawn_blocking(move || simplify_unit(&unit, model.as_ref(), options))
            .await
            .map_err(|e| RewriteError::internal(format!("simplifier task failed: {}", e)))?
    }
}

/// Unit without simplification markers; names stay fully qualified
pub fn strip_annotations(unit: &CompilationUnit) -> CompilationUnit {
    let root = unit.root_arc();
    // No decisions means no synthesis, so this cannot fail
    let stripped = rewrite_marked(&root, &FxHashMap::default(), &mut unit.id_allocator())
        .ok()
        .flatten()
        .unwrap_or(root);
    unit.with_root(stripped, 0)
}

/// Shortening decided for one qualified name
struct NameChoice {
    /// Text that replaces the name
    spelling: String,
    /// Import that makes `spelling` valid, if one is needed
    import: Option<String>,
}

pub(crate) fn simplify_unit(
    unit: &CompilationUnit,
    model: &dyn SemanticModel,
    options: SimplifyOptions,
) -> Result<SimplifiedUnit> {
    let root = unit.root_arc();
    let written = names_written_outside_marks(&root);

    let mut claimed: FxHashMap<String, String> = FxHashMap::default();
    let mut decisions: FxHashMap<NodeId, String> = FxHashMap::default();
    let mut imports: FxHashSet<String> = FxHashSet::default();

    for marked in root.descendants().filter(|n| n.simplify_origin().is_some()) {
        let Some(origin) = marked.simplify_origin() else { continue };
        for chain in qualified_names(marked) {
            let choice = choose(&chain, origin, model, options, &written, &mut claimed);
            if let Some(import) = choice.import {
                imports.insert(import);
            }
            if choice.spelling != chain.text() {
                decisions.insert(chain.id, choice.spelling);
            }
        }
    }

    let mut ids = unit.id_allocator();
    let new_root = rewrite_marked(&root, &decisions, &mut ids)?.unwrap_or_else(|| root.clone());

    let mut imports: Vec<String> = imports.into_iter().collect();
    imports.sort();
    let new_root = if imports.is_empty() {
        new_root
    } else {
        Arc::new(insert_imports(&new_root, &imports, &mut ids, unit.line_ending()))
    };

    info!(
        path = %unit.path().display(),
        shortened = decisions.len(),
        imports = imports.len(),
        "names simplified"
    );
    Ok(SimplifiedUnit {
        unit: unit.with_root(new_root, ids.watermark()),
        imports_added: imports,
        names_shortened: decisions.len(),
    })
}

fn choose(
    chain: &SyntaxNode,
    origin: NodeId,
    model: &dyn SemanticModel,
    options: SimplifyOptions,
    written: &FxHashSet<String>,
    claimed: &mut FxHashMap<String, String>,
) -> NameChoice {
    let full = chain.text();
    let segments: Vec<&str> = full.split('.').collect();

    // Shortest suffix first; the full name itself always stands
    for start in (1..segments.len()).rev() {
        let head = segments[start];
        let prefix = segments[..=start].join(".");
        if model.bind_type_name(head, origin).binds_to(&prefix) {
            debug!(name = %full, suffix = %segments[start..].join("."), "suffix binds");
            return NameChoice {
                spelling: segments[start..].join("."),
                import: None,
            };
        }
    }

    let simple = segments.last().copied().unwrap_or_default();
    let importable = options.add_imports
        && segments.len() > 1
        && model.bind_type_name(simple, origin) == NameBinding::Unbound
        && !written.contains(simple)
        && claimed.get(simple).map_or(true, |owner| *owner == full);
    if importable {
        claimed.insert(simple.to_string(), full.clone());
        return NameChoice {
            spelling: simple.to_string(),
            import: Some(full),
        };
    }
    NameChoice {
        spelling: full,
        import: None,
    }
}

/// Maximal dotted type names below `node` (including `node` itself)
fn qualified_names(node: &SyntaxNode) -> Vec<&SyntaxNode> {
    let mut out = Vec::new();
    collect_qualified_names(node, &mut out);
    out
}

fn collect_qualified_names<'a>(node: &'a SyntaxNode, out: &mut Vec<&'a SyntaxNode>) {
    if node.kind == SyntaxKind::ScopedTypeIdentifier {
        let pure = node.descendants().all(|n| n.kind.is_type_name());
        if pure {
            out.push(node);
        }
        return;
    }
    for child in node.child_nodes() {
        collect_qualified_names(child, out);
    }
}

/// Simple names the file already looks up in scope outside marked nodes
fn names_written_outside_marks(root: &SyntaxNode) -> FxHashSet<String> {
    let mut names = FxHashSet::default();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.simplify_origin().is_some() {
            continue;
        }
        if node.kind == SyntaxKind::ScopedTypeIdentifier || node.raw_kind == "scoped_identifier" {
            // Only the qualifier is looked up in scope
            stack.extend(node.child_nodes().next());
            continue;
        }
        if matches!(node.kind, SyntaxKind::TypeIdentifier | SyntaxKind::Identifier) {
            names.insert(node.text());
        }
        stack.extend(node.child_nodes());
    }
    names
}

/// Apply `decisions` inside marked nodes and drop every marker.
///
/// Returns `None` when nothing under `node` changed.
fn rewrite_marked(
    node: &Arc<SyntaxNode>,
    decisions: &FxHashMap<NodeId, String>,
    ids: &mut NodeIdAllocator,
) -> Result<Option<Arc<SyntaxNode>>> {
    if let Some(spelling) = decisions.get(&node.id) {
        let replacement = parse_type_name(spelling, ids)?
            .with_trivia_from(node)
            .with_field(node.field.clone())
            .with_span(node.span);
        return Ok(Some(Arc::new(replacement)));
    }

    let mut children: Option<Vec<SyntaxElement>> = None;
    for (index, child) in node.children.iter().enumerate() {
        let SyntaxElement::Node(child) = child else { continue };
        if let Some(new_child) = rewrite_marked(child, decisions, ids)? {
            let children = children.get_or_insert_with(|| node.children.clone());
            children[index] = SyntaxElement::Node(new_child);
        }
    }

    if children.is_none() && node.annotations.is_empty() {
        return Ok(None);
    }
    let mut rebuilt = SyntaxNode::clone(node).without_annotations();
    if let Some(children) = children {
        rebuilt = rebuilt.with_children(children);
    }
    Ok(Some(Arc::new(rebuilt)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::features::syntax::{Annotation, LanguageId, LineEnding, TreeSitterBuilder};
    use pretty_assertions::assert_eq;

    /// Binds names from a fixed table, wherever they are asked about
    struct FixedScope(FxHashMap<&'static str, NameBinding>);

    impl SemanticModel for FixedScope {
        fn type_of(&self, _slot: NodeId) -> Option<crate::features::semantic::TypeSymbol> {
            None
        }

        fn bind_type_name(&self, simple_name: &str, _at: NodeId) -> NameBinding {
            self.0.get(simple_name).cloned().unwrap_or(NameBinding::Unbound)
        }
    }

    fn scope(entries: &[(&'static str, NameBinding)]) -> FixedScope {
        FixedScope(entries.iter().cloned().collect())
    }

    /// Unit where the type of `var` slot number `i` is replaced by `spellings[i]`, marked
    fn marked_unit(source: &str, spellings: &[&str]) -> CompilationUnit {
        let built = TreeSitterBuilder::java().build(source).unwrap();
        let mut ids = NodeIdAllocator::starting_at(built.next_node_id);
        let mut root = built.root;
        let slots: Vec<SyntaxNode> = root
            .descendants()
            .filter(|n| n.field.as_deref() == Some("type") && n.text() == "var")
            .cloned()
            .collect();
        for (slot, spelling) in slots.iter().zip(spellings) {
            let replacement = parse_type_name(spelling, &mut ids)
                .unwrap()
                .with_trivia_from(slot)
                .with_field(slot.field.clone())
                .with_annotation(Annotation::Simplify { origin: slot.id });
            root = replace(&root, slot.id, &replacement);
        }
        CompilationUnit::new(
            PathBuf::from("A.java"),
            LanguageId::Java,
            Arc::new(root),
            LineEnding::detect(source),
            ids.watermark(),
        )
    }

    fn replace(node: &SyntaxNode, id: NodeId, with: &SyntaxNode) -> SyntaxNode {
        let children = node
            .children
            .iter()
            .map(|c| match c {
                SyntaxElement::Node(n) if n.id == id => SyntaxElement::Node(Arc::new(with.clone())),
                SyntaxElement::Node(n) => SyntaxElement::Node(Arc::new(replace(n, id, with))),
                SyntaxElement::Token(t) => SyntaxElement::Token(t.clone()),
            })
            .collect();
        node.clone().with_children(children)
    }

    fn has_marks(unit: &CompilationUnit) -> bool {
        unit.root().descendants().any(|n| !n.annotations.is_empty())
    }

    #[test]
    fn test_suffix_that_binds_is_used() {
        let unit = marked_unit(
            "class A { void f() { var s = g(); var m = h(); } }\n",
            &["java.lang.String", "java.util.Map.Entry<java.lang.String, java.lang.Integer>"],
        );
        let model = scope(&[
            ("String", NameBinding::Type("java.lang.String".into())),
            ("Integer", NameBinding::Type("java.lang.Integer".into())),
            ("Map", NameBinding::Type("java.util.Map".into())),
        ]);
        let options = SimplifyOptions { enabled: true, add_imports: false };
        let out = simplify_unit(&unit, &model, options).unwrap();
        assert_eq!(
            out.unit.render(),
            "class A { void f() { String s = g(); Map.Entry<String, Integer> m = h(); } }\n"
        );
        assert!(out.imports_added.is_empty());
        assert!(!has_marks(&out.unit));
    }

    #[test]
    fn test_import_added_for_unbound_name() {
        let unit = marked_unit(
            "package p;\n\nclass A {\n    void f() {\n        var xs = g();\n    }\n}\n",
            &["java.util.ArrayList<java.lang.Integer>"],
        );
        let model = scope(&[("Integer", NameBinding::Type("java.lang.Integer".into()))]);
        let out = simplify_unit(&unit, &model, SimplifyOptions::default()).unwrap();
        assert_eq!(
            out.unit.render(),
            "package p;\n\nimport java.util.ArrayList;\n\nclass A {\n    void f() {\n        ArrayList<Integer> xs = g();\n    }\n}\n"
        );
        assert_eq!(out.imports_added, vec!["java.util.ArrayList".to_string()]);
    }

    #[test]
    fn test_no_import_when_name_is_written_elsewhere() {
        let unit = marked_unit(
            "class A { List other; void f() { var xs = g(); } }\n",
            &["java.util.List<java.lang.Object>"],
        );
        let model = scope(&[("Object", NameBinding::Type("java.lang.Object".into()))]);
        let out = simplify_unit(&unit, &model, SimplifyOptions::default()).unwrap();
        assert_eq!(
            out.unit.render(),
            "class A { List other; void f() { java.util.List<Object> xs = g(); } }\n"
        );
        assert!(out.imports_added.is_empty());
    }

    #[test]
    fn test_qualified_spelling_elsewhere_does_not_block_import() {
        let unit = marked_unit(
            "class A { void f() { var l = new java.util.LinkedList<Integer>(); } }\n",
            &["java.util.LinkedList<java.lang.Integer>"],
        );
        let model = scope(&[("Integer", NameBinding::Type("java.lang.Integer".into()))]);
        let out = simplify_unit(&unit, &model, SimplifyOptions::default()).unwrap();
        assert_eq!(
            out.unit.render(),
            "import java.util.LinkedList;\n\nclass A { void f() { LinkedList<Integer> l = new java.util.LinkedList<Integer>(); } }\n"
        );
        assert_eq!(out.imports_added, vec!["java.util.LinkedList".to_string()]);
    }

    #[test]
    fn test_qualifier_head_still_blocks_import() {
        let unit = marked_unit(
            "class A { Outer.Inner other; void f() { var o = g(); } }\n",
            &["com.acme.Outer"],
        );
        let out = simplify_unit(&unit, &scope(&[]), SimplifyOptions::default()).unwrap();
        assert_eq!(
            out.unit.render(),
            "class A { Outer.Inner other; void f() { com.acme.Outer o = g(); } }\n"
        );
        assert!(out.imports_added.is_empty());
    }

    #[test]
    fn test_competing_imports_keep_second_name_qualified() {
        let unit = marked_unit(
            "class A { void f() { var a = g(); var b = h(); } }\n",
            &["java.util.Date", "java.sql.Date"],
        );
        let out = simplify_unit(&unit, &scope(&[]), SimplifyOptions::default()).unwrap();
        assert_eq!(
            out.unit.render(),
            "import java.util.Date;\n\nclass A { void f() { Date a = g(); java.sql.Date b = h(); } }\n"
        );
    }

    #[test]
    fn test_ambiguous_name_stays_qualified() {
        let unit = marked_unit("class A { void f() { var a = g(); } }\n", &["java.util.List"]);
        let model = scope(&[("List", NameBinding::Ambiguous)]);
        let out = simplify_unit(&unit, &model, SimplifyOptions::default()).unwrap();
        assert_eq!(out.unit.render(), "class A { void f() { java.util.List a = g(); } }\n");
    }

    #[tokio::test]
    async fn test_disabled_only_strips_marks() {
        let unit = marked_unit("class A { void f() { var a = g(); } }\n", &["java.lang.String"]);
        let simplifier = NameSimplifier::new(SimplifyOptions { enabled: false, add_imports: false });
        let model: Arc<dyn SemanticModel> = Arc::new(scope(&[]));
        let out = simplifier.simplify(unit, model).await.unwrap();
        assert_eq!(out.unit.render(), "class A { void f() { java.lang.String a = g(); } }\n");
        assert!(!has_marks(&out.unit));
    }
}
