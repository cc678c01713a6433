//! Pre-order scan for placeholder type slots

use tracing::debug;

use crate::features::declaration_scan::domain::ImplicitDeclaration;
use crate::features::syntax::{CompilationUnit, LanguageId, SyntaxNode};

/// Scanner bound to one language's placeholder spelling
#[derive(Debug, Clone, Copy)]
pub struct DeclarationScanner {
    placeholder: &'static str,
}

impl DeclarationScanner {
    pub fn for_language(language: LanguageId) -> Self {
        Self {
            placeholder: language.placeholder_keyword(),
        }
    }

    pub fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    /// Implicit declarations under `root`, in source order.
    ///
    /// The iterator is lazy and borrows the tree; scanning again yields the
    /// same sequence.
    pub fn scan<'a>(&self, root: &'a SyntaxNode) -> impl Iterator<Item = ImplicitDeclaration<'a>> + 'a {
        let placeholder = self.placeholder;
        root.descendants()
            .filter(|node| node.kind.is_variable_declaration())
            .filter_map(move |declaration| {
                let type_slot = declaration.child_by_field("type")?;
                is_placeholder(type_slot, placeholder).then_some(ImplicitDeclaration {
                    declaration,
                    type_slot,
                })
            })
            .inspect(|site| debug!(slot = %site.slot_id(), line = site.line(), "implicit declaration"))
    }
}

/// Implicit declarations of a unit, using the unit's language
pub fn scan(unit: &CompilationUnit) -> impl Iterator<Item = ImplicitDeclaration<'_>> + '_ {
    DeclarationScanner::for_language(unit.language()).scan(unit.root())
}

fn is_placeholder(slot: &SyntaxNode, placeholder: &str) -> bool {
    slot.kind.is_type_name() && slot.text() == placeholder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::syntax::TreeSitterBuilder;

    fn root(source: &str) -> SyntaxNode {
        TreeSitterBuilder::java().build(source).unwrap().root
    }

    #[test]
    fn test_scan_finds_all_declaration_shapes_in_order() {
        let root = root(
            r#"class A {
    void f(java.util.List<String> xs) throws Exception {
        var a = 1;
        for (var s : xs) {}
        try (var in = new java.io.StringReader("")) {}
        String b = "b";
    }
}
"#,
        );
        let scanner = DeclarationScanner::for_language(LanguageId::Java);
        let lines: Vec<u32> = scanner.scan(&root).map(|d| d.line()).collect();
        assert_eq!(lines, vec![3, 4, 5]);
        let names: Vec<Vec<String>> = scanner.scan(&root).map(|d| d.variable_names()).collect();
        assert_eq!(names, vec![vec!["a".to_string()], vec!["s".to_string()], vec!["in".to_string()]]);
    }

    #[test]
    fn test_scan_is_restartable() {
        let root = root("class A { void f() { var a = 1; var b = 2; } }");
        let scanner = DeclarationScanner::for_language(LanguageId::Java);
        let first: Vec<_> = scanner.scan(&root).map(|d| d.slot_id()).collect();
        let second: Vec<_> = scanner.scan(&root).map(|d| d.slot_id()).collect();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_var_as_identifier_or_field_is_ignored() {
        let root = root("class A { int var = 1; void f(var x) { int y = var; } }");
        let scanner = DeclarationScanner::for_language(LanguageId::Java);
        assert_eq!(scanner.scan(&root).count(), 0);
    }
}
