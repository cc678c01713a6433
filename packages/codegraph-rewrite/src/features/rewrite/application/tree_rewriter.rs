//! Structural rewrite of type slots
//!
//! One pass over the tree rebuilds only the paths that lead to a planned
//! slot; untouched subtrees are shared with the input unit. Either every
//! planned slot is replaced or no tree is produced.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::features::rewrite::domain::RewritePlan;
use crate::features::syntax::{CompilationUnit, NodeId, SyntaxElement, SyntaxNode};
use crate::shared::models::{Result, RewriteError};

#[derive(Debug, Default, Clone, Copy)]
pub struct TreeRewriter;

impl TreeRewriter {
    pub fn new() -> Self {
        Self
    }

    /// Apply `plan` to `unit`, returning a new unit
    pub fn apply(&self, unit: &CompilationUnit, plan: &RewritePlan) -> Result<CompilationUnit> {
        if plan.is_empty() {
            return Ok(unit.with_root(unit.root_arc(), plan.next_node_id()));
        }

        let mut hits: FxHashMap<NodeId, usize> = plan.slots().map(|slot| (slot, 0)).collect();
        let root = unit.root_arc();
        let rebuilt = rebuild(&root, plan, &mut hits)?;

        let mut hits: Vec<(NodeId, usize)> = hits.into_iter().collect();
        hits.sort();
        for (slot, count) in hits {
            match count {
                1 => {}
                0 => {
                    return Err(RewriteError::structural(format!("planned slot {} not found", slot))
                        .with_file(unit.path().display().to_string()))
                }
                n => {
                    return Err(RewriteError::structural(format!("planned slot {} found {} times", slot, n))
                        .with_file(unit.path().display().to_string()))
                }
            }
        }

        debug!(path = %unit.path().display(), replaced = plan.len(), "tree rewritten");
        Ok(unit.with_root(rebuilt.unwrap_or(root), plan.next_node_id()))
    }
}

/// New node when something below `node` changed, `None` otherwise
fn rebuild(
    node: &Arc<SyntaxNode>,
    plan: &RewritePlan,
    hits: &mut FxHashMap<NodeId, usize>,
) -> Result<Option<Arc<SyntaxNode>>> {
    let mut children: Option<Vec<SyntaxElement>> = None;

    for (index, child) in node.children.iter().enumerate() {
        let SyntaxElement::Node(child) = child else { continue };

        let replaced = match plan.get(child.id) {
            Some(replacement) => {
                if !is_type_slot(node, child) {
                    return Err(RewriteError::structural(format!(
                        "planned node {} ({}) is not the type slot of a variable declaration",
                        child.id, child.raw_kind
                    ))
                    .with_line(child.span.start_line));
                }
                *hits.entry(child.id).or_insert(0) += 1;
                Some(Arc::new(replacement.clone()))
            }
            None => rebuild(child, plan, hits)?,
        };

        if let Some(new_child) = replaced {
            let children = children.get_or_insert_with(|| node.children.clone());
            children[index] = SyntaxElement::Node(new_child);
        }
    }

    Ok(children.map(|children| Arc::new(SyntaxNode::clone(node).with_children(children))))
}

fn is_type_slot(parent: &SyntaxNode, child: &SyntaxNode) -> bool {
    parent.kind.is_variable_declaration() && child.field.as_deref() == Some("type")
}
