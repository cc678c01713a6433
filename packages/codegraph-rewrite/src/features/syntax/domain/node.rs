//! Immutable, lossless syntax tree
//!
//! Nodes are shared through `Arc`; deriving a new tree clones only the path
//! from the root to the changed nodes. Tokens own their trivia, so rendering
//! every token in order reproduces the source exactly.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::syntax_kind::SyntaxKind;
use super::trivia::{render_trivia, Trivia};
use crate::shared::models::Span;

/// Stable identity of a node within one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out fresh node ids above a tree's watermark
#[derive(Debug, Clone)]
pub struct NodeIdAllocator {
    next: u32,
}

impl NodeIdAllocator {
    pub fn starting_at(next: u32) -> Self {
        Self { next }
    }

    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    /// First id not yet handed out
    pub fn watermark(&self) -> u32 {
        self.next
    }
}

/// Marker attached to synthesized nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Annotation {
    /// Eligible for name simplification; `origin` is the slot it replaced
    Simplify { origin: NodeId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxToken {
    pub raw_kind: String,
    pub text: String,
    pub leading: Vec<Trivia>,
    pub trailing: Vec<Trivia>,
}

impl SyntaxToken {
    pub fn new(raw_kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            raw_kind: raw_kind.into(),
            text: text.into(),
            leading: Vec::new(),
            trailing: Vec::new(),
        }
    }

    /// End-of-file marker; carries the trivia after the last real token
    pub fn eof() -> Self {
        Self::new("EOF", "")
    }

    pub fn with_leading(mut self, leading: Vec<Trivia>) -> Self {
        self.leading = leading;
        self
    }

    pub fn with_trailing(mut self, trailing: Vec<Trivia>) -> Self {
        self.trailing = trailing;
        self
    }

    pub fn is_eof(&self) -> bool {
        self.raw_kind == "EOF"
    }

    pub fn render_into(&self, out: &mut String) {
        render_trivia(&self.leading, out);
        out.push_str(&self.text);
        render_trivia(&self.trailing, out);
    }
}

#[derive(Debug, Clone)]
pub enum SyntaxElement {
    Node(Arc<SyntaxNode>),
    Token(SyntaxToken),
}

impl SyntaxElement {
    pub fn as_node(&self) -> Option<&SyntaxNode> {
        match self {
            SyntaxElement::Node(node) => Some(node.as_ref()),
            SyntaxElement::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&SyntaxToken> {
        match self {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub id: NodeId,
    pub kind: SyntaxKind,
    /// Grammar name of the node (for debugging and language-specific logic)
    pub raw_kind: String,
    /// Field name this node occupies in its parent, if any
    pub field: Option<String>,
    pub span: Span,
    pub children: Vec<SyntaxElement>,
    pub annotations: Vec<Annotation>,
}

impl SyntaxNode {
    pub fn new(id: NodeId, kind: SyntaxKind, raw_kind: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            raw_kind: raw_kind.into(),
            field: None,
            span: Span::zero(),
            children: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: Option<String>) -> Self {
        self.field = field;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn with_children(mut self, children: Vec<SyntaxElement>) -> Self {
        self.children = children;
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        if !self.annotations.contains(&annotation) {
            self.annotations.push(annotation);
        }
        self
    }

    pub fn without_annotations(mut self) -> Self {
        self.annotations.clear();
        self
    }

    /// Origin slot of a node awaiting simplification
    pub fn simplify_origin(&self) -> Option<NodeId> {
        self.annotations.iter().find_map(|a| match a {
            Annotation::Simplify { origin } => Some(*origin),
        })
    }

    pub fn child_nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter_map(SyntaxElement::as_node)
    }

    /// First child node occupying `field`
    pub fn child_by_field(&self, field: &str) -> Option<&SyntaxNode> {
        self.child_nodes()
            .find(|child| child.field.as_deref() == Some(field))
    }

    pub fn children_by_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a SyntaxNode> {
        self.child_nodes()
            .filter(move |child| child.field.as_deref() == Some(field))
    }

    pub fn child_by_raw_kind(&self, raw_kind: &str) -> Option<&SyntaxNode> {
        self.child_nodes().find(|child| child.raw_kind == raw_kind)
    }

    /// Whether an anonymous token with `text` is a direct child
    pub fn has_token(&self, text: &str) -> bool {
        self.children
            .iter()
            .filter_map(SyntaxElement::as_token)
            .any(|token| token.text == text)
    }

    /// Pre-order walk including `self`
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// All tokens in source order
    pub fn tokens(&self) -> Vec<&SyntaxToken> {
        let mut tokens = Vec::new();
        collect_tokens(self, &mut tokens);
        tokens
    }

    pub fn first_token(&self) -> Option<&SyntaxToken> {
        self.children.iter().find_map(|child| match child {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(node) => node.first_token(),
        })
    }

    pub fn last_token(&self) -> Option<&SyntaxToken> {
        self.children.iter().rev().find_map(|child| match child {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(node) => node.last_token(),
        })
    }

    pub fn leading_trivia(&self) -> &[Trivia] {
        self.first_token().map_or(&[], |t| t.leading.as_slice())
    }

    pub fn trailing_trivia(&self) -> &[Trivia] {
        self.last_token().map_or(&[], |t| t.trailing.as_slice())
    }

    /// Source text including all trivia
    pub fn full_text(&self) -> String {
        let mut out = String::new();
        for token in self.tokens() {
            token.render_into(&mut out);
        }
        out
    }

    /// Source text without the outer leading/trailing trivia
    pub fn text(&self) -> String {
        let tokens = self.tokens();
        let mut out = String::new();
        let last = tokens.len().saturating_sub(1);
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 {
                render_trivia(&token.leading, &mut out);
            }
            out.push_str(&token.text);
            if i < last {
                render_trivia(&token.trailing, &mut out);
            }
        }
        out
    }

    /// Copy of `self` whose outer trivia is taken from `other`
    pub fn with_trivia_from(mut self, other: &SyntaxNode) -> Self {
        let leading = other.leading_trivia().to_vec();
        let trailing = other.trailing_trivia().to_vec();
        self.map_first_token(|t| t.leading = leading);
        self.map_last_token(|t| t.trailing = trailing);
        self
    }

    pub fn with_leading_trivia(mut self, leading: Vec<Trivia>) -> Self {
        self.map_first_token(|t| t.leading = leading);
        self
    }

    pub fn with_trailing_trivia(mut self, trailing: Vec<Trivia>) -> Self {
        self.map_last_token(|t| t.trailing = trailing);
        self
    }

    fn map_first_token<F: FnOnce(&mut SyntaxToken)>(&mut self, f: F) -> bool {
        let mut f = Some(f);
        for child in self.children.iter_mut() {
            let applied = match child {
                SyntaxElement::Token(token) => {
                    if let Some(f) = f.take() {
                        f(token);
                    }
                    true
                }
                SyntaxElement::Node(node) => {
                    if node.first_token().is_none() {
                        false
                    } else {
                        match f.take() {
                            Some(f) => Arc::make_mut(node).map_first_token(f),
                            None => true,
                        }
                    }
                }
            };
            if applied {
                return true;
            }
        }
        false
    }

    fn map_last_token<F: FnOnce(&mut SyntaxToken)>(&mut self, f: F) -> bool {
        let mut f = Some(f);
        for child in self.children.iter_mut().rev() {
            let applied = match child {
                SyntaxElement::Token(token) => {
                    if let Some(f) = f.take() {
                        f(token);
                    }
                    true
                }
                SyntaxElement::Node(node) => {
                    if node.last_token().is_none() {
                        false
                    } else {
                        match f.take() {
                            Some(f) => Arc::make_mut(node).map_last_token(f),
                            None => true,
                        }
                    }
                }
            };
            if applied {
                return true;
            }
        }
        false
    }
}

fn collect_tokens<'a>(node: &'a SyntaxNode, out: &mut Vec<&'a SyntaxToken>) {
    for child in &node.children {
        match child {
            SyntaxElement::Token(token) => out.push(token),
            SyntaxElement::Node(inner) => collect_tokens(inner, out),
        }
    }
}

/// Lazy pre-order iterator over a subtree
pub struct Descendants<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let before = self.stack.len();
        self.stack.extend(node.child_nodes());
        self.stack[before..].reverse();
        Some(node)
    }
}
