//! Syntax infrastructure (tree-sitter)

mod tree_sitter_builder;

pub use tree_sitter_builder::{BuildError, BuiltTree, TreeSitterBuilder};
