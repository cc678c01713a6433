use crate::features::semantic::domain::{NameBinding, TypeSymbol};
use crate::features::syntax::NodeId;

/// Read-only semantic queries over one loaded compilation unit
///
/// Node ids refer to the tree the model was loaded with. Replacement nodes
/// synthesized later are queried through the slot they replaced.
pub trait SemanticModel: Send + Sync {
    /// Converted type of the declaration owning the type slot `slot`
    fn type_of(&self, slot: NodeId) -> Option<TypeSymbol>;

    /// Resolve a simple type name in the scope enclosing `at`
    fn bind_type_name(&self, simple_name: &str, at: NodeId) -> NameBinding;
}
