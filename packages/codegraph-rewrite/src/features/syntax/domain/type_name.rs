//! Type-name synthesis
//!
//! Parses a spelled type (`java.util.Map<java.lang.String, int[]>`) into a
//! detached type-reference subtree shaped like the nodes tree-sitter-java
//! produces, so the rest of the pipeline can treat synthesized and parsed
//! types alike.

use std::sync::Arc;

use thiserror::Error;

use super::node::{NodeIdAllocator, SyntaxElement, SyntaxNode, SyntaxToken};
use super::syntax_kind::SyntaxKind;
use super::trivia::{split_gap, Trivia};
use crate::shared::models::RewriteError;

const INTEGRAL: &[&str] = &["byte", "short", "int", "long", "char"];
const FLOATING: &[&str] = &["float", "double"];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeNameError {
    #[error("empty type spelling")]
    Empty,

    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("unexpected '{found}' at offset {offset}, expected {expected}")]
    Unexpected {
        found: String,
        offset: usize,
        expected: &'static str,
    },

    #[error("spelling ended early, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
}

impl From<TypeNameError> for RewriteError {
    fn from(err: TypeNameError) -> Self {
        RewriteError::synthesis(format!("cannot synthesize type: {}", err)).with_source(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexKind {
    Ident,
    Punct,
}

#[derive(Debug, Clone)]
struct Lexeme {
    kind: LexKind,
    text: String,
    offset: usize,
    trailing: Vec<Trivia>,
}

fn lex(spelling: &str) -> Result<Vec<Lexeme>, TypeNameError> {
    let mut lexemes: Vec<Lexeme> = Vec::new();
    let mut chars = spelling.char_indices().peekable();
    while let Some(&(offset, ch)) = chars.peek() {
        if ch.is_whitespace() {
            let start = offset;
            let mut end = offset;
            while let Some(&(i, c)) = chars.peek() {
                if !c.is_whitespace() {
                    break;
                }
                end = i + c.len_utf8();
                chars.next();
            }
            if let Some(last) = lexemes.last_mut() {
                last.trailing.extend(split_gap(&spelling[start..end]));
            }
            continue;
        }
        if is_ident_start(ch) {
            let mut end = offset;
            while let Some(&(i, c)) = chars.peek() {
                if !is_ident_part(c) {
                    break;
                }
                end = i + c.len_utf8();
                chars.next();
            }
            lexemes.push(Lexeme {
                kind: LexKind::Ident,
                text: spelling[offset..end].to_string(),
                offset,
                trailing: Vec::new(),
            });
            continue;
        }
        if matches!(ch, '.' | '<' | '>' | ',' | '?' | '[' | ']') {
            chars.next();
            lexemes.push(Lexeme {
                kind: LexKind::Punct,
                text: ch.to_string(),
                offset,
                trailing: Vec::new(),
            });
            continue;
        }
        return Err(TypeNameError::UnexpectedChar { ch, offset });
    }
    Ok(lexemes)
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

struct TypeParser<'a> {
    lexemes: Vec<Lexeme>,
    pos: usize,
    ids: &'a mut NodeIdAllocator,
}

impl<'a> TypeParser<'a> {
    fn peek(&self) -> Option<&Lexeme> {
        self.lexemes.get(self.pos)
    }

    fn peek_punct(&self, punct: &str) -> bool {
        self.peek()
            .is_some_and(|l| l.kind == LexKind::Punct && l.text == punct)
    }

    fn peek_ident_at(&self, ahead: usize) -> bool {
        self.lexemes
            .get(self.pos + ahead)
            .is_some_and(|l| l.kind == LexKind::Ident)
    }

    fn bump(&mut self, expected: &'static str) -> Result<Lexeme, TypeNameError> {
        let lexeme = self
            .lexemes
            .get(self.pos)
            .cloned()
            .ok_or(TypeNameError::UnexpectedEnd { expected })?;
        self.pos += 1;
        Ok(lexeme)
    }

    fn expect_punct(&mut self, punct: &'static str) -> Result<SyntaxToken, TypeNameError> {
        let lexeme = self.bump(punct)?;
        if lexeme.kind != LexKind::Punct || lexeme.text != punct {
            return Err(TypeNameError::Unexpected {
                found: lexeme.text,
                offset: lexeme.offset,
                expected: punct,
            });
        }
        Ok(token(punct, lexeme))
    }

    fn expect_ident(&mut self, expected: &'static str) -> Result<Lexeme, TypeNameError> {
        let lexeme = self.bump(expected)?;
        if lexeme.kind != LexKind::Ident {
            return Err(TypeNameError::Unexpected {
                found: lexeme.text,
                offset: lexeme.offset,
                expected,
            });
        }
        Ok(lexeme)
    }

    fn node(&mut self, raw_kind: &str, children: Vec<SyntaxElement>) -> SyntaxNode {
        SyntaxNode::new(self.ids.next_id(), SyntaxKind::from_java(raw_kind), raw_kind)
            .with_children(children)
    }

    /// Named leaf: a node wrapping a single token of the same kind
    fn leaf(&mut self, raw_kind: &str, lexeme: Lexeme) -> SyntaxNode {
        let tok = token(raw_kind, lexeme);
        self.node(raw_kind, vec![SyntaxElement::Token(tok)])
    }

    fn parse_type(&mut self) -> Result<SyntaxNode, TypeNameError> {
        let head = self.expect_ident("a type name")?;
        let element = if INTEGRAL.contains(&head.text.as_str()) {
            self.primitive("integral_type", head)
        } else if FLOATING.contains(&head.text.as_str()) {
            self.primitive("floating_point_type", head)
        } else if head.text == "boolean" {
            self.primitive("boolean_type", head)
        } else {
            self.parse_class_type(head)?
        };
        self.parse_dimensions(element)
    }

    fn primitive(&mut self, raw_kind: &str, lexeme: Lexeme) -> SyntaxNode {
        let keyword = lexeme.text.clone();
        let tok = token(&keyword, lexeme);
        self.node(raw_kind, vec![SyntaxElement::Token(tok)])
    }

    fn parse_class_type(&mut self, head: Lexeme) -> Result<SyntaxNode, TypeNameError> {
        let mut current = self.leaf("type_identifier", head);
        loop {
            if self.peek_punct("<") {
                let args = self.parse_type_arguments()?;
                current = self.node(
                    "generic_type",
                    vec![
                        SyntaxElement::Node(Arc::new(current)),
                        SyntaxElement::Node(Arc::new(args)),
                    ],
                );
                continue;
            }
            if self.peek_punct(".") && self.peek_ident_at(1) {
                let dot = self.expect_punct(".")?;
                let name = self.expect_ident("a type name")?;
                let name = self.leaf("type_identifier", name);
                current = self.node(
                    "scoped_type_identifier",
                    vec![
                        SyntaxElement::Node(Arc::new(current)),
                        SyntaxElement::Token(dot),
                        SyntaxElement::Node(Arc::new(name)),
                    ],
                );
                continue;
            }
            break;
        }
        Ok(current)
    }

    fn parse_type_arguments(&mut self) -> Result<SyntaxNode, TypeNameError> {
        let mut children = vec![SyntaxElement::Token(self.expect_punct("<")?)];
        if !self.peek_punct(">") {
            loop {
                let arg = if self.peek_punct("?") {
                    self.parse_wildcard()?
                } else {
                    self.parse_type()?
                };
                children.push(SyntaxElement::Node(Arc::new(arg)));
                if self.peek_punct(",") {
                    children.push(SyntaxElement::Token(self.expect_punct(",")?));
                    continue;
                }
                break;
            }
        }
        children.push(SyntaxElement::Token(self.expect_punct(">")?));
        Ok(self.node("type_arguments", children))
    }

    fn parse_wildcard(&mut self) -> Result<SyntaxNode, TypeNameError> {
        let mut children = vec![SyntaxElement::Token(self.expect_punct("?")?)];
        let bound = self
            .peek()
            .filter(|l| l.kind == LexKind::Ident)
            .map(|l| l.text.clone());
        match bound.as_deref() {
            Some("extends") => {
                let kw = self.bump("extends")?;
                children.push(SyntaxElement::Token(token("extends", kw)));
                children.push(SyntaxElement::Node(Arc::new(self.parse_type()?)));
            }
            Some("super") => {
                let kw = self.bump("super")?;
                let sup = self.leaf("super", kw);
                children.push(SyntaxElement::Node(Arc::new(sup)));
                children.push(SyntaxElement::Node(Arc::new(self.parse_type()?)));
            }
            _ => {}
        }
        Ok(self.node("wildcard", children))
    }

    fn parse_dimensions(&mut self, element: SyntaxNode) -> Result<SyntaxNode, TypeNameError> {
        if !self.peek_punct("[") {
            return Ok(element);
        }
        let mut brackets = Vec::new();
        while self.peek_punct("[") {
            brackets.push(SyntaxElement::Token(self.expect_punct("[")?));
            brackets.push(SyntaxElement::Token(self.expect_punct("]")?));
        }
        let dimensions = self
            .node("dimensions", brackets)
            .with_field(Some("dimensions".to_string()));
        let element = element.with_field(Some("element".to_string()));
        Ok(self.node(
            "array_type",
            vec![
                SyntaxElement::Node(Arc::new(element)),
                SyntaxElement::Node(Arc::new(dimensions)),
            ],
        ))
    }
}

fn token(raw_kind: &str, lexeme: Lexeme) -> SyntaxToken {
    SyntaxToken::new(raw_kind, lexeme.text).with_trailing(lexeme.trailing)
}

/// Parse a type spelling into a detached type-reference node.
///
/// Whitespace inside the spelling is kept as trailing trivia; leading and
/// trailing whitespace of the whole spelling is dropped.
pub fn parse_type_name(
    spelling: &str,
    ids: &mut NodeIdAllocator,
) -> Result<SyntaxNode, TypeNameError> {
    let spelling = spelling.trim();
    if spelling.is_empty() {
        return Err(TypeNameError::Empty);
    }
    let mut lexemes = lex(spelling)?;
    if let Some(last) = lexemes.last_mut() {
        last.trailing.clear();
    }
    let mut parser = TypeParser {
        lexemes,
        pos: 0,
        ids,
    };
    let node = parser.parse_type()?;
    if let Some(extra) = parser.peek() {
        return Err(TypeNameError::Unexpected {
            found: extra.text.clone(),
            offset: extra.offset,
            expected: "end of type",
        });
    }
    Ok(node)
}
