//! Language-neutral syntax node kinds
//!
//! Only the shapes the rewriter reasons about get their own variant; every
//! other construct is `Other` and keeps its grammar name in `raw_kind`.

/// Syntax node kind (language-neutral)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    CompilationUnit,
    PackageDecl,
    ImportDecl,
    TypeDecl,
    TypeBody,
    MethodDecl,
    FieldDecl,
    Block,
    Lambda,

    // Variable declarations (type slot + declarators)
    LocalVariableDecl,
    EnhancedFor,
    Resource,
    VariableDeclarator,

    // Type references
    TypeIdentifier,
    ScopedTypeIdentifier,
    GenericType,
    TypeArguments,
    ArrayType,
    Dimensions,
    PrimitiveType,
    Wildcard,

    Identifier,
    Other,
}

impl SyntaxKind {
    /// Declarations that carry a `type` slot followed by declarators
    pub fn is_variable_declaration(&self) -> bool {
        matches!(
            self,
            SyntaxKind::LocalVariableDecl | SyntaxKind::EnhancedFor | SyntaxKind::Resource
        )
    }

    pub fn is_type_reference(&self) -> bool {
        matches!(
            self,
            SyntaxKind::TypeIdentifier
                | SyntaxKind::ScopedTypeIdentifier
                | SyntaxKind::GenericType
                | SyntaxKind::ArrayType
                | SyntaxKind::PrimitiveType
                | SyntaxKind::Wildcard
        )
    }

    /// Name-like type references that simplification may shorten
    pub fn is_type_name(&self) -> bool {
        matches!(
            self,
            SyntaxKind::TypeIdentifier | SyntaxKind::ScopedTypeIdentifier
        )
    }

    /// Map a tree-sitter-java node kind
    pub fn from_java(raw_kind: &str) -> Self {
        match raw_kind {
            "program" => SyntaxKind::CompilationUnit,
            "package_declaration" => SyntaxKind::PackageDecl,
            "import_declaration" => SyntaxKind::ImportDecl,
            "class_declaration"
            | "interface_declaration"
            | "enum_declaration"
            | "record_declaration"
            | "annotation_type_declaration" => SyntaxKind::TypeDecl,
            "class_body" | "interface_body" | "enum_body" | "annotation_type_body"
            | "enum_body_declarations" => SyntaxKind::TypeBody,
            "method_declaration" | "constructor_declaration" | "compact_constructor_declaration" => {
                SyntaxKind::MethodDecl
            }
            "field_declaration" | "constant_declaration" => SyntaxKind::FieldDecl,
            "block" | "constructor_body" => SyntaxKind::Block,
            "lambda_expression" => SyntaxKind::Lambda,
            "local_variable_declaration" => SyntaxKind::LocalVariableDecl,
            "enhanced_for_statement" => SyntaxKind::EnhancedFor,
            "resource" => SyntaxKind::Resource,
            "variable_declarator" => SyntaxKind::VariableDeclarator,
            "type_identifier" => SyntaxKind::TypeIdentifier,
            "scoped_type_identifier" => SyntaxKind::ScopedTypeIdentifier,
            "generic_type" => SyntaxKind::GenericType,
            "type_arguments" => SyntaxKind::TypeArguments,
            "array_type" => SyntaxKind::ArrayType,
            "dimensions" => SyntaxKind::Dimensions,
            "integral_type" | "floating_point_type" | "boolean_type" | "void_type" => {
                SyntaxKind::PrimitiveType
            }
            "wildcard" => SyntaxKind::Wildcard,
            "identifier" => SyntaxKind::Identifier,
            _ => SyntaxKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_declaration_kinds() {
        assert!(SyntaxKind::from_java("local_variable_declaration").is_variable_declaration());
        assert!(SyntaxKind::from_java("enhanced_for_statement").is_variable_declaration());
        assert!(SyntaxKind::from_java("resource").is_variable_declaration());
        assert!(!SyntaxKind::from_java("field_declaration").is_variable_declaration());
    }

    #[test]
    fn test_type_reference_kinds() {
        assert!(SyntaxKind::from_java("generic_type").is_type_reference());
        assert!(SyntaxKind::from_java("integral_type").is_type_reference());
        assert!(!SyntaxKind::from_java("type_arguments").is_type_reference());
        assert_eq!(SyntaxKind::from_java("binary_expression"), SyntaxKind::Other);
    }
}
