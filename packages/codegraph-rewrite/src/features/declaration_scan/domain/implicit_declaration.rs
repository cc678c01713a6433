use crate::features::syntax::{NodeId, SyntaxNode};

/// One implicitly-typed declaration site, borrowed from its unit
#[derive(Debug, Clone, Copy)]
pub struct ImplicitDeclaration<'a> {
    /// Local variable declaration, enhanced `for` or resource
    pub declaration: &'a SyntaxNode,
    /// The `type` child holding the placeholder
    pub type_slot: &'a SyntaxNode,
}

impl<'a> ImplicitDeclaration<'a> {
    pub fn slot_id(&self) -> NodeId {
        self.type_slot.id
    }

    pub fn line(&self) -> u32 {
        self.type_slot.span.start_line
    }

    /// Declared variable names, in order
    pub fn variable_names(&self) -> Vec<String> {
        match self.declaration.child_by_field("name") {
            Some(name) => vec![name.text()],
            None => self
                .declaration
                .children_by_field("declarator")
                .filter_map(|d| d.child_by_field("name"))
                .map(SyntaxNode::text)
                .collect(),
        }
    }
}
