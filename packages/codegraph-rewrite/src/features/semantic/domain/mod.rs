//! Semantic domain models

mod project_context;
mod type_symbol;

pub use project_context::{ProjectContext, DEFAULT_MAX_FILE_BYTES};
pub use type_symbol::{NameBinding, TypeKind, TypeSymbol};
