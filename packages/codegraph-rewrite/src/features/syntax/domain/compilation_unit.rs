//! Compilation unit: the immutable tree of one source file

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::language::LanguageId;
use super::node::{NodeId, NodeIdAllocator, SyntaxNode};

/// Line terminator style detected in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    /// Majority vote over the source's line breaks (LF when there are none)
    pub fn detect(source: &str) -> Self {
        let crlf = source.matches("\r\n").count();
        let lf = source.matches('\n').count() - crlf;
        if crlf > lf {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompilationUnit {
    path: PathBuf,
    language: LanguageId,
    root: Arc<SyntaxNode>,
    line_ending: LineEnding,
    next_node_id: u32,
}

impl CompilationUnit {
    pub fn new(
        path: impl Into<PathBuf>,
        language: LanguageId,
        root: Arc<SyntaxNode>,
        line_ending: LineEnding,
        next_node_id: u32,
    ) -> Self {
        Self {
            path: path.into(),
            language,
            root,
            line_ending,
            next_node_id,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn language(&self) -> LanguageId {
        self.language
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn root_arc(&self) -> Arc<SyntaxNode> {
        Arc::clone(&self.root)
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Allocator for nodes synthesized against this tree
    pub fn id_allocator(&self) -> NodeIdAllocator {
        NodeIdAllocator::starting_at(self.next_node_id)
    }

    /// Derive a new unit with a different root; `self` is left untouched
    pub fn with_root(&self, root: Arc<SyntaxNode>, next_node_id: u32) -> Self {
        Self {
            path: self.path.clone(),
            language: self.language,
            root,
            line_ending: self.line_ending,
            next_node_id: next_node_id.max(self.next_node_id),
        }
    }

    pub fn find_node(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.root.descendants().find(|node| node.id == id)
    }

    pub fn node_count(&self) -> usize {
        self.root.descendants().count()
    }

    /// Render the tree back to source text
    pub fn render(&self) -> String {
        self.root.full_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_ending_detection() {
        assert_eq!(LineEnding::detect("a\r\nb\r\nc\n"), LineEnding::CrLf);
        assert_eq!(LineEnding::detect("a\nb\r\n"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("single line"), LineEnding::Lf);
    }
}
