//! Java semantic infrastructure
//!
//! This is where the Java knowledge lives: type representation, the JDK
//! catalog, name binding and the per-unit analyzer behind `JavaProvider`.

mod java_analyzer;
mod java_catalog;
mod java_expressions;
mod java_names;
mod java_provider;
mod java_types;

pub use java_analyzer::{JavaAnalyzer, JavaSemanticModel};
pub use java_provider::JavaProvider;
