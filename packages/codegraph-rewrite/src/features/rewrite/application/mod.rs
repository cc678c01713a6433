mod tree_rewriter;

pub use tree_rewriter::TreeRewriter;
