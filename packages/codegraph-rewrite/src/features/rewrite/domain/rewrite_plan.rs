//! Immutable slot → replacement map

use std::collections::BTreeMap;

use crate::features::syntax::{NodeId, SyntaxNode};
use crate::features::type_resolution::Resolution;
use crate::shared::models::{Result, RewriteError};

/// Replacements keyed by the id of the slot they replace
#[derive(Debug, Clone, Default)]
pub struct RewritePlan {
    replacements: BTreeMap<NodeId, SyntaxNode>,
    next_node_id: u32,
}

impl RewritePlan {
    /// Build the plan from resolver output; slots must be unique and disjoint
    pub fn from_resolution(resolution: &Resolution) -> Result<Self> {
        let mut spans: Vec<_> = resolution.candidates.iter().map(|c| c.span).collect();
        spans.sort_by_key(|span| span.start_byte);
        if let Some(pair) = spans.windows(2).find(|pair| pair[0].overlaps(&pair[1])) {
            return Err(RewriteError::structural(format!(
                "slots at {} and {} overlap",
                pair[0], pair[1]
            )));
        }

        let mut replacements = BTreeMap::new();
        for candidate in &resolution.candidates {
            if replacements
                .insert(candidate.slot, candidate.replacement.clone())
                .is_some()
            {
                return Err(RewriteError::structural(format!(
                    "slot {} planned twice",
                    candidate.slot
                )));
            }
        }
        Ok(Self {
            replacements,
            next_node_id: resolution.next_node_id,
        })
    }

    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    pub fn get(&self, slot: NodeId) -> Option<&SyntaxNode> {
        self.replacements.get(&slot)
    }

    pub fn slots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.replacements.keys().copied()
    }

    /// Node-id watermark covering every replacement node
    pub fn next_node_id(&self) -> u32 {
        self.next_node_id
    }
}
