//! Syntax domain: lossless immutable trees and type-name synthesis

pub mod compilation_unit;
pub mod language;
pub mod node;
pub mod syntax_kind;
pub mod trivia;
pub mod type_name;

pub use compilation_unit::{CompilationUnit, LineEnding};
pub use language::LanguageId;
pub use node::{Annotation, NodeId, NodeIdAllocator, SyntaxElement, SyntaxNode, SyntaxToken};
pub use syntax_kind::SyntaxKind;
pub use trivia::{Trivia, TriviaKind};
pub use type_name::{parse_type_name, TypeNameError};
