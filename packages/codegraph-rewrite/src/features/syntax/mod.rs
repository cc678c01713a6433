//! Syntax Feature
//!
//! Lossless, immutable syntax trees shared by every rewrite stage.
//!
//! ## Structure
//! - `domain/` - SyntaxNode, SyntaxToken, Trivia, CompilationUnit, type-name synthesis
//! - `infrastructure/` - TreeSitterBuilder (tree-sitter-java → lossless tree)

pub mod domain;
pub mod infrastructure;

pub use domain::{
    parse_type_name, Annotation, CompilationUnit, LanguageId, LineEnding, NodeId,
    NodeIdAllocator, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, Trivia, TriviaKind,
    TypeNameError,
};
pub use infrastructure::{BuildError, BuiltTree, TreeSitterBuilder};
