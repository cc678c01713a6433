//! Tree-sitter backed lossless tree builder
//!
//! This is where the tree-sitter dependency lives. Tree-sitter trees only
//! record byte ranges; the builder turns the gaps between leaves into trivia
//! and hangs it on tokens so the resulting tree renders the exact source.

use std::sync::Arc;

use thiserror::Error;
use tree_sitter::{Node, Parser};

use crate::features::syntax::domain::trivia::{distribute, split_gap};
use crate::features::syntax::domain::{
    NodeId, NodeIdAllocator, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, Trivia,
};
use crate::shared::models::Span;
use crate::shared::utils::tree_sitter::{
    children_with_fields, collect_error_spans, extract_node_text, node_to_span,
};

/// Node kinds kept as a single token even though tree-sitter gives them children
const ATOMIC_KINDS: &[&str] = &["string_literal", "text_block", "character_literal"];

const MAX_REPORTED_ERRORS: usize = 8;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to load grammar: {0}")]
    Language(String),

    #[error("parser produced no tree")]
    NoTree,

    #[error("rendered tree differs from source at byte {0}")]
    NotLossless(usize),
}

/// Output of one build
#[derive(Debug)]
pub struct BuiltTree {
    pub root: SyntaxNode,
    /// First node id not used by the tree
    pub next_node_id: u32,
    /// Locations of ERROR / MISSING nodes
    pub errors: Vec<Span>,
}

impl BuiltTree {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Converts tree-sitter-java parses into lossless syntax trees
pub struct TreeSitterBuilder {
    language: tree_sitter::Language,
    map_kind: fn(&str) -> SyntaxKind,
}

impl TreeSitterBuilder {
    pub fn java() -> Self {
        Self {
            language: tree_sitter_java::language(),
            map_kind: SyntaxKind::from_java,
        }
    }

    pub fn build(&self, source: &str) -> Result<BuiltTree, BuildError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| BuildError::Language(e.to_string()))?;
        let tree = parser.parse(source, None).ok_or(BuildError::NoTree)?;
        let ts_root = tree.root_node();

        let tokens = collect_tokens(&ts_root, source);
        let mut tokens = tokens.into_iter();
        let mut ids = NodeIdAllocator::starting_at(0);
        let mut root = self.convert(&ts_root, None, source, &mut tokens, &mut ids);
        let eof = tokens.next().unwrap_or_else(SyntaxToken::eof);
        root.children.push(SyntaxElement::Token(eof));

        let rendered = root.full_text();
        if rendered != source {
            let at = rendered
                .bytes()
                .zip(source.bytes())
                .position(|(a, b)| a != b)
                .unwrap_or_else(|| rendered.len().min(source.len()));
            return Err(BuildError::NotLossless(at));
        }

        let errors = if ts_root.has_error() {
            collect_error_spans(&ts_root, MAX_REPORTED_ERRORS)
        } else {
            Vec::new()
        };

        Ok(BuiltTree {
            root,
            next_node_id: ids.watermark(),
            errors,
        })
    }

    fn convert(
        &self,
        node: &Node,
        field: Option<&'static str>,
        source: &str,
        tokens: &mut impl Iterator<Item = SyntaxToken>,
        ids: &mut NodeIdAllocator,
    ) -> SyntaxNode {
        let id: NodeId = ids.next_id();
        let raw_kind = node.kind();
        let children = if is_leaf(node) {
            tokens
                .next()
                .map(SyntaxElement::Token)
                .into_iter()
                .collect()
        } else {
            let mut children = Vec::with_capacity(node.child_count());
            for (child, child_field) in children_with_fields(node) {
                if child.is_extra() {
                    continue;
                }
                if child.is_named() || is_atomic(&child) {
                    let converted = self.convert(&child, child_field, source, tokens, ids);
                    children.push(SyntaxElement::Node(Arc::new(converted)));
                } else if is_leaf(&child) {
                    if let Some(token) = tokens.next() {
                        children.push(SyntaxElement::Token(token));
                    }
                } else {
                    // Anonymous inner nodes only show up under ERROR recovery
                    let converted = self.convert(&child, child_field, source, tokens, ids);
                    children.push(SyntaxElement::Node(Arc::new(converted)));
                }
            }
            children
        };

        SyntaxNode::new(id, (self.map_kind)(raw_kind), raw_kind)
            .with_field(field.map(str::to_string))
            .with_span(node_to_span(node))
            .with_children(children)
    }
}

fn is_atomic(node: &Node) -> bool {
    ATOMIC_KINDS.contains(&node.kind())
}

fn is_leaf(node: &Node) -> bool {
    node.child_count() == 0 || is_atomic(node)
}

/// Leaves in document order; extras (comments) are reported as trivia
enum Leaf<'t> {
    Token(Node<'t>),
    Comment(Node<'t>),
}

fn collect_leaves<'t>(node: Node<'t>, out: &mut Vec<Leaf<'t>>) {
    if node.is_extra() {
        out.push(Leaf::Comment(node));
        return;
    }
    if is_leaf(&node) {
        out.push(Leaf::Token(node));
        return;
    }
    for (child, _) in children_with_fields(&node) {
        collect_leaves(child, out);
    }
}

/// Flatten the tree into tokens with distributed trivia; the last token is EOF
fn collect_tokens(root: &Node, source: &str) -> Vec<SyntaxToken> {
    let mut leaves = Vec::new();
    collect_leaves(*root, &mut leaves);

    let mut tokens: Vec<SyntaxToken> = Vec::with_capacity(leaves.len() + 1);
    let mut pending: Vec<Trivia> = Vec::new();
    let mut cursor = 0usize;

    for leaf in leaves {
        let node = match &leaf {
            Leaf::Token(node) | Leaf::Comment(node) => *node,
        };
        let start = node.start_byte().max(cursor);
        if let Some(gap) = source.get(cursor..start) {
            pending.extend(split_gap(gap));
        }
        cursor = cursor.max(node.end_byte());
        let text = if node.start_byte() < start {
            source.get(start..cursor).unwrap_or("")
        } else {
            extract_node_text(&node, source)
        };
        match leaf {
            Leaf::Comment(_) => pending.push(Trivia::comment(text)),
            Leaf::Token(_) => {
                let leading = attach_pending(&mut tokens, std::mem::take(&mut pending));
                tokens.push(SyntaxToken::new(node.kind(), text).with_leading(leading));
            }
        }
    }

    if let Some(tail) = source.get(cursor..) {
        pending.extend(split_gap(tail));
    }
    let leading = attach_pending(&mut tokens, pending);
    tokens.push(SyntaxToken::eof().with_leading(leading));
    tokens
}

/// Hand the trailing part of `pending` to the previous token; return the rest
fn attach_pending(tokens: &mut [SyntaxToken], pending: Vec<Trivia>) -> Vec<Trivia> {
    match tokens.last_mut() {
        Some(previous) => {
            let (trailing, leading) = distribute(pending);
            previous.trailing.extend(trailing);
            leading
        }
        None => pending,
    }
}
