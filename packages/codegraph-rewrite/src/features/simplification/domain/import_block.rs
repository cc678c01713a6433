//! Import directive synthesis and placement

use std::sync::Arc;

use crate::features::syntax::{
    LineEnding, NodeIdAllocator, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, Trivia,
};

/// `import a.b.C;` followed by a line break
pub fn build_import(fqn: &str, ids: &mut NodeIdAllocator, line_ending: LineEnding) -> SyntaxNode {
    let id = ids.next_id();
    let mut segments = fqn.split('.');
    let head = identifier(segments.next().unwrap_or_default(), ids);
    let name = segments.fold(head, |scope, segment| {
        let scope = scope.with_field(Some("scope".into()));
        let name = identifier(segment, ids).with_field(Some("name".into()));
        SyntaxNode::new(ids.next_id(), SyntaxKind::Other, "scoped_identifier").with_children(vec![
            SyntaxElement::Node(Arc::new(scope)),
            SyntaxElement::Token(SyntaxToken::new(".", ".")),
            SyntaxElement::Node(Arc::new(name)),
        ])
    });

    SyntaxNode::new(id, SyntaxKind::ImportDecl, "import_declaration").with_children(vec![
        SyntaxElement::Token(SyntaxToken::new("import", "import").with_trailing(vec![Trivia::whitespace(" ")])),
        SyntaxElement::Node(Arc::new(name)),
        SyntaxElement::Token(
            SyntaxToken::new(";", ";").with_trailing(vec![Trivia::end_of_line(line_ending.as_str())]),
        ),
    ])
}

fn identifier(text: &str, ids: &mut NodeIdAllocator) -> SyntaxNode {
    SyntaxNode::new(ids.next_id(), SyntaxKind::Identifier, "identifier")
        .with_children(vec![SyntaxElement::Token(SyntaxToken::new("identifier", text))])
}

/// Insert imports for `fqns` (in the given order) into a compilation-unit root.
///
/// Placement: after the last import, else after the package declaration,
/// else at the top of the file where the imports take over the file's
/// leading trivia.
pub fn insert_imports(
    root: &SyntaxNode,
    fqns: &[String],
    ids: &mut NodeIdAllocator,
    line_ending: LineEnding,
) -> SyntaxNode {
    if fqns.is_empty() {
        return root.clone();
    }
    let eol = || Trivia::end_of_line(line_ending.as_str());
    let mut imports: Vec<SyntaxNode> = fqns
        .iter()
        .map(|fqn| build_import(fqn, ids, line_ending))
        .collect();
    let mut children = root.children.clone();

    let anchor = last_child_index(root, "import_declaration")
        .map(|idx| (idx, false))
        .or_else(|| last_child_index(root, "package_declaration").map(|idx| (idx, true)));

    let position = match anchor {
        Some((idx, after_package)) => {
            let ends_line = children[idx]
                .as_node()
                .is_some_and(|n| n.trailing_trivia().iter().any(Trivia::is_end_of_line));
            let mut leading = Vec::new();
            if !ends_line {
                leading.push(eol());
            }
            if after_package {
                leading.push(eol());
            }
            if !leading.is_empty() {
                let first = imports.remove(0).with_leading_trivia(leading);
                imports.insert(0, first);
            }
            idx + 1
        }
        None => {
            let file_leading = match children.first() {
                Some(SyntaxElement::Node(node)) => node.leading_trivia().to_vec(),
                Some(SyntaxElement::Token(token)) => token.leading.clone(),
                None => Vec::new(),
            };
            let first = imports.remove(0).with_leading_trivia(file_leading);
            imports.insert(0, first);
            if let Some(element) = children.first_mut() {
                *element = with_leading(element, vec![eol()]);
            }
            0
        }
    };

    children.splice(
        position..position,
        imports.into_iter().map(|n| SyntaxElement::Node(Arc::new(n))),
    );
    root.clone().with_children(children)
}

fn last_child_index(root: &SyntaxNode, raw_kind: &str) -> Option<usize> {
    root.children
        .iter()
        .rposition(|c| c.as_node().is_some_and(|n| n.raw_kind == raw_kind))
}

fn with_leading(element: &SyntaxElement, leading: Vec<Trivia>) -> SyntaxElement {
    match element {
        SyntaxElement::Node(node) => {
            SyntaxElement::Node(Arc::new(SyntaxNode::clone(node).with_leading_trivia(leading)))
        }
        SyntaxElement::Token(token) => SyntaxElement::Token(token.clone().with_leading(leading)),
    }
}
