//! Semantic ports (trait interfaces)

mod semantic_model;
mod semantic_provider;

pub use semantic_model::SemanticModel;
pub use semantic_provider::{LoadedDocument, ProviderError, SemanticProvider};
