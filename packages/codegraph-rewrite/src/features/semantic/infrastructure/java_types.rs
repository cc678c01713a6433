//! Java type representation used by the local semantic model

use rustc_hash::FxHashMap;

use crate::features::semantic::domain::TypeSymbol;
use crate::features::syntax::{SyntaxKind, SyntaxNode};

pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";

const BOXES: &[(&str, &str)] = &[
    ("boolean", "java.lang.Boolean"),
    ("byte", "java.lang.Byte"),
    ("short", "java.lang.Short"),
    ("char", "java.lang.Character"),
    ("int", "java.lang.Integer"),
    ("long", "java.lang.Long"),
    ("float", "java.lang.Float"),
    ("double", "java.lang.Double"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    Extends,
    Super,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JavaType {
    Primitive(String),
    Class { fqn: String, args: Vec<JavaType> },
    Array(Box<JavaType>),
    Wildcard(Option<(WildcardBound, Box<JavaType>)>),
    TypeVariable(String),
    /// Type of the `null` literal
    Null,
    /// Anonymous class instance; carries its base type for diagnostics
    Anonymous(Box<JavaType>),
    /// Lambda or method reference without a target type
    Function,
    Error(String),
    Unknown,
}

impl JavaType {
    pub fn class(fqn: impl Into<String>) -> Self {
        JavaType::Class {
            fqn: fqn.into(),
            args: Vec::new(),
        }
    }

    pub fn generic(fqn: impl Into<String>, args: Vec<JavaType>) -> Self {
        JavaType::Class {
            fqn: fqn.into(),
            args,
        }
    }

    pub fn primitive(name: &str) -> Self {
        JavaType::Primitive(name.to_string())
    }

    pub fn string() -> Self {
        Self::class(STRING)
    }

    pub fn object() -> Self {
        Self::class(OBJECT)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, JavaType::Unknown | JavaType::Error(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, JavaType::Class { fqn, .. } if fqn == STRING)
    }

    pub fn is_primitive(&self, name: &str) -> bool {
        matches!(self, JavaType::Primitive(p) if p == name)
    }

    pub fn class_fqn(&self) -> Option<&str> {
        match self {
            JavaType::Class { fqn, .. } => Some(fqn),
            _ => None,
        }
    }

    /// Boxed form of a primitive, `self` otherwise
    pub fn boxed(&self) -> JavaType {
        match self {
            JavaType::Primitive(name) => BOXES
                .iter()
                .find(|(p, _)| p == name)
                .map(|(_, boxed)| JavaType::class(*boxed))
                .unwrap_or(JavaType::Unknown),
            other => other.clone(),
        }
    }

    /// Primitive form of a box class, `self` otherwise
    pub fn unboxed(&self) -> JavaType {
        match self {
            JavaType::Class { fqn, .. } => BOXES
                .iter()
                .find(|(_, boxed)| boxed == fqn)
                .map(|(p, _)| JavaType::primitive(p))
                .unwrap_or_else(|| self.clone()),
            other => other.clone(),
        }
    }

    fn numeric_rank(&self) -> Option<u8> {
        match self.unboxed() {
            JavaType::Primitive(p) => match p.as_str() {
                "byte" | "short" | "char" | "int" => Some(0),
                "long" => Some(1),
                "float" => Some(2),
                "double" => Some(3),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric_rank().is_some()
    }

    /// Unary numeric promotion
    pub fn promote_unary(&self) -> JavaType {
        match self.numeric_rank() {
            Some(0) => JavaType::primitive("int"),
            Some(_) => self.unboxed(),
            None => JavaType::Unknown,
        }
    }

    /// Binary numeric promotion
    pub fn promote_binary(&self, other: &JavaType) -> JavaType {
        match (self.numeric_rank(), other.numeric_rank()) {
            (Some(a), Some(b)) => match a.max(b) {
                3 => JavaType::primitive("double"),
                2 => JavaType::primitive("float"),
                1 => JavaType::primitive("long"),
                _ => JavaType::primitive("int"),
            },
            _ => JavaType::Unknown,
        }
    }

    /// Replace type variables found in `bindings`
    pub fn substitute(&self, bindings: &FxHashMap<String, JavaType>) -> JavaType {
        match self {
            JavaType::TypeVariable(name) => bindings.get(name).cloned().unwrap_or_else(|| self.clone()),
            JavaType::Class { fqn, args } => JavaType::Class {
                fqn: fqn.clone(),
                args: args.iter().map(|a| a.substitute(bindings).boxed()).collect(),
            },
            JavaType::Array(element) => JavaType::Array(Box::new(element.substitute(bindings))),
            JavaType::Wildcard(Some((bound, ty))) => {
                JavaType::Wildcard(Some((*bound, Box::new(ty.substitute(bindings)))))
            }
            other => other.clone(),
        }
    }

    /// Whether any type variable occurs in `self`
    pub fn mentions_type_variable(&self, names: &[String]) -> bool {
        match self {
            JavaType::TypeVariable(name) => names.contains(name),
            JavaType::Class { args, .. } => args.iter().any(|a| a.mentions_type_variable(names)),
            JavaType::Array(element) => element.mentions_type_variable(names),
            JavaType::Wildcard(Some((_, ty))) => ty.mentions_type_variable(names),
            _ => false,
        }
    }

    /// Upward projection applied to the type of a `var` initializer
    pub fn project_upward(&self) -> JavaType {
        match self {
            JavaType::Wildcard(None) | JavaType::Wildcard(Some((WildcardBound::Super, _))) => {
                JavaType::object()
            }
            JavaType::Wildcard(Some((WildcardBound::Extends, ty))) => ty.project_upward(),
            other => other.clone(),
        }
    }

    /// Fully-qualified source spelling
    pub fn spelling(&self) -> String {
        match self {
            JavaType::Primitive(name) | JavaType::TypeVariable(name) => name.clone(),
            JavaType::Class { fqn, args } if args.is_empty() => fqn.clone(),
            JavaType::Class { fqn, args } => {
                let args: Vec<String> = args.iter().map(JavaType::spelling).collect();
                format!("{}<{}>", fqn, args.join(", "))
            }
            JavaType::Array(element) => format!("{}[]", element.spelling()),
            JavaType::Wildcard(None) => "?".to_string(),
            JavaType::Wildcard(Some((WildcardBound::Extends, ty))) => {
                format!("? extends {}", ty.spelling())
            }
            JavaType::Wildcard(Some((WildcardBound::Super, ty))) => {
                format!("? super {}", ty.spelling())
            }
            JavaType::Null => "null".to_string(),
            JavaType::Anonymous(base) => format!("<anonymous {}>", base.spelling()),
            JavaType::Function => "<lambda>".to_string(),
            JavaType::Error(reason) => format!("<error: {}>", reason),
            JavaType::Unknown => "?".to_string(),
        }
    }

    /// Spelling with simple class names
    pub fn display(&self) -> String {
        match self {
            JavaType::Class { fqn, args } => {
                let simple = fqn.rsplit('.').next().unwrap_or(fqn);
                if args.is_empty() {
                    simple.to_string()
                } else {
                    let args: Vec<String> = args.iter().map(JavaType::display).collect();
                    format!("{}<{}>", simple, args.join(", "))
                }
            }
            JavaType::Array(element) => format!("{}[]", element.display()),
            JavaType::Wildcard(Some((WildcardBound::Extends, ty))) => {
                format!("? extends {}", ty.display())
            }
            JavaType::Wildcard(Some((WildcardBound::Super, ty))) => {
                format!("? super {}", ty.display())
            }
            other => other.spelling(),
        }
    }

    /// First non-concrete component, if any
    fn blocker(&self) -> Option<&JavaType> {
        match self {
            JavaType::Null
            | JavaType::Anonymous(_)
            | JavaType::Function
            | JavaType::Error(_)
            | JavaType::Unknown => Some(self),
            JavaType::Class { args, .. } => args.iter().find_map(JavaType::blocker),
            JavaType::Array(element) => element.blocker(),
            JavaType::Wildcard(Some((_, ty))) => ty.blocker(),
            _ => None,
        }
    }

    pub fn to_symbol(&self) -> TypeSymbol {
        match self.blocker() {
            None => TypeSymbol::concrete(self.spelling(), self.display()),
            Some(JavaType::Anonymous(base)) => {
                TypeSymbol::anonymous(format!("<anonymous {}>", base.display()))
            }
            Some(JavaType::Unknown) => TypeSymbol::unknown(),
            Some(JavaType::Null) => TypeSymbol::error("<null>"),
            Some(other) => TypeSymbol::error(other.spelling()),
        }
    }
}

/// Convert a type-reference node into a `JavaType`.
///
/// `bind` maps a simple or qualified name to a type; it decides between
/// classes and type variables.
pub fn type_from_node(node: &SyntaxNode, bind: &dyn Fn(&str) -> JavaType) -> JavaType {
    match node.raw_kind.as_str() {
        "integral_type" | "floating_point_type" | "boolean_type" => {
            JavaType::Primitive(node.text())
        }
        "void_type" => JavaType::Error("void".to_string()),
        "type_identifier" => bind(&node.text()),
        "scoped_type_identifier" => {
            if node.child_nodes().any(|c| c.kind == SyntaxKind::GenericType) {
                // Outer<A>.Inner: keep outer arguments out of the model
                JavaType::Unknown
            } else {
                bind(&qualified_text(node))
            }
        }
        "generic_type" => {
            let mut children = node.child_nodes();
            let base = children.next().map(|n| type_from_node(n, bind));
            let args = children
                .find(|c| c.kind == SyntaxKind::TypeArguments)
                .map(|args| {
                    args.child_nodes()
                        .filter(|n| n.kind != SyntaxKind::Other || n.raw_kind == "annotated_type")
                        .map(|n| type_from_node(n, bind))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            match base {
                Some(JavaType::Class { fqn, .. }) => JavaType::generic(fqn, args),
                Some(other) => other,
                None => JavaType::Unknown,
            }
        }
        "array_type" => {
            let element = node
                .child_by_field("element")
                .map(|n| type_from_node(n, bind))
                .unwrap_or(JavaType::Unknown);
            let depth = node
                .child_by_field("dimensions")
                .map(|d| d.tokens().iter().filter(|t| t.text == "[").count())
                .unwrap_or(1);
            wrap_array(element, depth)
        }
        "wildcard" => {
            let bound_type = node
                .child_nodes()
                .filter(|n| n.raw_kind != "super" && n.raw_kind != "annotation" && n.raw_kind != "marker_annotation")
                .last()
                .map(|n| type_from_node(n, bind));
            match bound_type {
                None => JavaType::Wildcard(None),
                Some(ty) => {
                    let bound = if node.child_by_raw_kind("super").is_some() {
                        WildcardBound::Super
                    } else {
                        WildcardBound::Extends
                    };
                    JavaType::Wildcard(Some((bound, Box::new(ty))))
                }
            }
        }
        "annotated_type" => node
            .child_nodes()
            .filter(|n| n.kind.is_type_reference())
            .last()
            .map(|n| type_from_node(n, bind))
            .unwrap_or(JavaType::Unknown),
        _ => JavaType::Unknown,
    }
}

pub fn wrap_array(element: JavaType, depth: usize) -> JavaType {
    (0..depth).fold(element, |ty, _| JavaType::Array(Box::new(ty)))
}

/// Dotted name of a scoped identifier without trivia or annotations
pub fn qualified_text(node: &SyntaxNode) -> String {
    node.tokens()
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .concat()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::syntax::{parse_type_name, NodeIdAllocator};

    fn parse(spelling: &str) -> JavaType {
        let mut ids = NodeIdAllocator::starting_at(0);
        let node = parse_type_name(spelling, &mut ids).unwrap();
        type_from_node(&node, &|name| {
            if name.contains('.') {
                JavaType::class(name)
            } else {
                JavaType::TypeVariable(name.to_string())
            }
        })
    }

    #[test]
    fn test_spelling_round_trip() {
        for spelling in [
            "java.util.Map<java.lang.String, java.util.List<java.lang.Integer>>",
            "int[][]",
            "java.util.List<? extends java.lang.Number>",
            "java.util.List<? super T>",
        ] {
            assert_eq!(parse(spelling).spelling(), spelling);
        }
    }

    #[test]
    fn test_substitute_boxes_type_arguments() {
        let template = parse("java.util.List<E>");
        let mut bindings = FxHashMap::default();
        bindings.insert("E".to_string(), JavaType::primitive("int"));
        assert_eq!(
            template.substitute(&bindings).spelling(),
            "java.util.List<java.lang.Integer>"
        );
    }

    #[test]
    fn test_numeric_promotion() {
        let int = JavaType::primitive("int");
        let long = JavaType::class("java.lang.Long");
        assert_eq!(int.promote_binary(&long), JavaType::primitive("long"));
        assert_eq!(JavaType::primitive("char").promote_unary(), int);
        assert_eq!(int.promote_binary(&JavaType::string()), JavaType::Unknown);
    }

    #[test]
    fn test_symbol_classification() {
        assert!(parse("java.lang.String").to_symbol().is_concrete());
        let anon = JavaType::generic(
            "java.util.List",
            vec![JavaType::Anonymous(Box::new(JavaType::object()))],
        );
        assert_eq!(anon.to_symbol().kind, crate::features::semantic::domain::TypeKind::Anonymous);
        assert_eq!(JavaType::Null.to_symbol().kind, crate::features::semantic::domain::TypeKind::Error);
        assert_eq!(JavaType::Unknown.to_symbol().kind, crate::features::semantic::domain::TypeKind::Unknown);
    }

    #[test]
    fn test_upward_projection() {
        assert_eq!(parse("? extends java.lang.Number").project_upward(), JavaType::class("java.lang.Number"));
        assert_eq!(JavaType::Wildcard(None).project_upward(), JavaType::object());
    }
}
