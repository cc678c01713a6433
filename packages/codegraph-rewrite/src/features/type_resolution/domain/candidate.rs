use serde::{Deserialize, Serialize};

use crate::features::semantic::TypeSymbol;
use crate::features::syntax::{NodeId, SyntaxNode};
use crate::shared::models::Span;

/// Why a site was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The model had no symbol for the slot
    Unresolved,
    Unknown,
    ErrorType,
    Anonymous,
    /// The type would be spelled with the placeholder itself
    PlaceholderSpelling,
    /// The fully-qualified spelling could not be turned into a type node
    Synthesis,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Unresolved => "unresolved",
            SkipReason::Unknown => "unknown",
            SkipReason::ErrorType => "error_type",
            SkipReason::Anonymous => "anonymous",
            SkipReason::PlaceholderSpelling => "placeholder_spelling",
            SkipReason::Synthesis => "synthesis",
        }
    }
}

/// Diagnostic record for a skipped site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSite {
    pub slot: NodeId,
    pub line: u32,
    pub reason: SkipReason,
}

/// Accepted site with its synthesized replacement
#[derive(Debug, Clone)]
pub struct RewriteCandidate {
    pub slot: NodeId,
    pub span: Span,
    pub symbol: TypeSymbol,
    /// Fully-qualified type node carrying the slot's trivia and a simplify marker
    pub replacement: SyntaxNode,
}

/// Resolver output for one unit
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub candidates: Vec<RewriteCandidate>,
    pub skipped: Vec<SkippedSite>,
    /// Node-id watermark after synthesis
    pub next_node_id: u32,
}

impl Resolution {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
