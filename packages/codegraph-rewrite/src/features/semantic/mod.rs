//! Semantic Feature
//!
//! Read-only semantic queries over a loaded compilation unit.
//!
//! ## Structure
//! - `domain/` - TypeSymbol, NameBinding, ProjectContext
//! - `ports/` - SemanticModel and SemanticProvider traits
//! - `infrastructure/` - JavaProvider (tree-sitter-java + local model)

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{NameBinding, ProjectContext, TypeKind, TypeSymbol, DEFAULT_MAX_FILE_BYTES};
pub use infrastructure::{JavaAnalyzer, JavaProvider, JavaSemanticModel};
pub use ports::{LoadedDocument, ProviderError, SemanticModel, SemanticProvider};
