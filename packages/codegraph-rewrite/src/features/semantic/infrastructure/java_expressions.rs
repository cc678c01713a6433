//! Expression typing for the Java analyzer

use rustc_hash::FxHashMap;

use super::java_analyzer::{this_type_of, JavaAnalyzer};
use super::java_catalog::{MethodInfo, JAVA_CATALOG};
use super::java_types::{qualified_text, wrap_array, JavaType, OBJECT};
use crate::features::syntax::{SyntaxElement, SyntaxNode};

const MAX_SUPERTYPE_DEPTH: usize = 16;

const COMPARISON_OPERATORS: &[&str] = &["==", "!=", "<", ">", "<=", ">=", "&&", "||"];

impl JavaAnalyzer {
    /// Static type of an expression at the current walk position
    pub(super) fn type_of_expr(&self, node: &SyntaxNode) -> JavaType {
        match node.raw_kind.as_str() {
            "decimal_integer_literal" | "hex_integer_literal" | "octal_integer_literal"
            | "binary_integer_literal" => {
                if node.text().ends_with(['l', 'L']) {
                    JavaType::primitive("long")
                } else {
                    JavaType::primitive("int")
                }
            }
            "decimal_floating_point_literal" | "hex_floating_point_literal" => {
                if node.text().ends_with(['f', 'F']) {
                    JavaType::primitive("float")
                } else {
                    JavaType::primitive("double")
                }
            }
            "true" | "false" => JavaType::primitive("boolean"),
            "character_literal" => JavaType::primitive("char"),
            "string_literal" | "text_block" => JavaType::string(),
            "null_literal" => JavaType::Null,
            "this" => self.this_type(),
            "identifier" => self.lookup_variable(&node.text()),
            "parenthesized_expression" => node
                .child_nodes()
                .next()
                .map(|inner| self.type_of_expr(inner))
                .unwrap_or(JavaType::Unknown),
            "cast_expression" => {
                let types: Vec<&SyntaxNode> = node.children_by_field("type").collect();
                match types.as_slice() {
                    [single] => self.resolve_type_node(single, &self.snapshot()),
                    _ => JavaType::Unknown,
                }
            }
            "object_creation_expression" => self.type_of_creation(node),
            "array_creation_expression" => self.type_of_array_creation(node),
            "array_initializer" => JavaType::Error("array initializer needs an explicit target type".into()),
            "array_access" => match node.child_by_field("array").map(|a| self.type_of_expr(a)) {
                Some(JavaType::Array(element)) => *element,
                _ => JavaType::Unknown,
            },
            "method_invocation" => self.type_of_invocation(node),
            "field_access" => self.type_of_field_access(node),
            "binary_expression" => self.type_of_binary(node),
            "unary_expression" => {
                let operand = node
                    .child_by_field("operand")
                    .map(|o| self.type_of_expr(o))
                    .unwrap_or(JavaType::Unknown);
                match operator_of(node) {
                    Some("!") => JavaType::primitive("boolean"),
                    Some(_) => operand.promote_unary(),
                    None => JavaType::Unknown,
                }
            }
            "update_expression" => node
                .child_nodes()
                .next()
                .map(|operand| self.type_of_expr(operand))
                .unwrap_or(JavaType::Unknown),
            "assignment_expression" => node
                .child_by_field("left")
                .map(|left| self.type_of_expr(left))
                .unwrap_or(JavaType::Unknown),
            "ternary_expression" => self.type_of_ternary(node),
            "instanceof_expression" => JavaType::primitive("boolean"),
            "lambda_expression" | "method_reference" => JavaType::Function,
            "class_literal" => {
                let target = node
                    .child_nodes()
                    .next()
                    .map(|t| self.resolve_type_node(t, &self.snapshot()))
                    .unwrap_or(JavaType::Unknown);
                match target {
                    JavaType::Error(_) => JavaType::generic("java.lang.Class", vec![JavaType::class("java.lang.Void")]),
                    other => JavaType::generic("java.lang.Class", vec![other.boxed()]),
                }
            }
            _ => JavaType::Unknown,
        }
    }

    fn this_type(&self) -> JavaType {
        match self.enclosing.last() {
            Some(ctx) if ctx.anonymous => JavaType::Anonymous(Box::new(JavaType::class(ctx.fqn.clone()))),
            Some(ctx) => self
                .class_info(&ctx.fqn)
                .map(this_type_of)
                .unwrap_or_else(|| JavaType::class(ctx.fqn.clone())),
            None => JavaType::Unknown,
        }
    }

    fn lookup_variable(&self, name: &str) -> JavaType {
        if let Some(ty) = self.vars.lookup(name) {
            return ty.clone();
        }
        for ctx in self.enclosing.iter().rev() {
            let receiver = match self.class_info(&ctx.fqn) {
                Some(info) => this_type_of(info),
                None => continue,
            };
            if let Some(ty) = self.find_field(&receiver, name, None) {
                return ty;
            }
        }
        JavaType::Unknown
    }

    /// Element type produced by iterating `iterable` in an enhanced `for`
    pub(super) fn element_type(&self, iterable: &JavaType) -> JavaType {
        match iterable {
            JavaType::Array(element) => (**element).clone(),
            JavaType::Class { .. } => self
                .as_supertype(iterable, "java.lang.Iterable", 0)
                .and_then(|ty| match ty {
                    JavaType::Class { mut args, .. } if !args.is_empty() => Some(args.remove(0)),
                    JavaType::Class { .. } => Some(JavaType::object()),
                    _ => None,
                })
                .unwrap_or(JavaType::Unknown),
            _ => JavaType::Unknown,
        }
    }

    /// View `ty` as an instance of the class `target`, walking supertypes
    fn as_supertype(&self, ty: &JavaType, target: &str, depth: usize) -> Option<JavaType> {
        let JavaType::Class { fqn, args } = ty else { return None };
        if fqn == target {
            return Some(ty.clone());
        }
        if depth > MAX_SUPERTYPE_DEPTH {
            return None;
        }
        let info = self.class_info(fqn)?;
        let bindings = info.bindings_for(args);
        info.supertypes
            .iter()
            .map(|sup| sup.substitute(&bindings))
            .find_map(|sup| self.as_supertype(&sup, target, depth + 1))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Members
    // ═══════════════════════════════════════════════════════════════════

    /// Return type of `name(args)` on `receiver`.
    ///
    /// Every overload of matching arity on the receiver and its supertypes is
    /// a candidate; candidates that disagree on the return type give `Unknown`.
    /// `want_static` restricts the lookup to static (`Some(true)`) members.
    fn find_method(
        &self,
        receiver: &JavaType,
        name: &str,
        args: &[JavaType],
        want_static: Option<bool>,
    ) -> Option<JavaType> {
        if let JavaType::Array(_) = receiver {
            return (name == "clone").then(|| receiver.clone());
        }
        let mut returns = Vec::new();
        self.collect_overloads(receiver, name, args, want_static, 0, &mut returns);
        if returns.is_empty() && want_static != Some(true) && receiver.class_fqn() != Some(OBJECT) {
            self.collect_overloads(&JavaType::object(), name, args, want_static, 0, &mut returns);
        }
        let (first, rest) = returns.split_first()?;
        Some(if rest.iter().all(|r| r == first) {
            first.clone()
        } else {
            JavaType::Unknown
        })
    }

    fn collect_overloads(
        &self,
        receiver: &JavaType,
        name: &str,
        args: &[JavaType],
        want_static: Option<bool>,
        depth: usize,
        returns: &mut Vec<JavaType>,
    ) {
        let JavaType::Class { fqn, args: type_args } = receiver else { return };
        if depth > MAX_SUPERTYPE_DEPTH {
            return;
        }
        let Some(info) = self.class_info(fqn) else { return };
        let bindings = info.bindings_for(type_args);

        let overloads = info.methods.get(name).into_iter().flatten();
        returns.extend(
            overloads
                .filter(|m| m.arity.map_or(true, |arity| arity == args.len()))
                .filter(|m| want_static.map_or(true, |s| !s || m.is_static))
                .map(|m: &MethodInfo| {
                    if m.returns.mentions_type_variable(&m.type_params) {
                        JavaType::Unknown
                    } else {
                        apply_argument_templates(&m.returns.substitute(&bindings), args)
                    }
                }),
        );

        for sup in &info.supertypes {
            let sup = sup.substitute(&bindings);
            self.collect_overloads(&sup, name, args, want_static, depth + 1, returns);
        }
    }

    fn find_field(&self, receiver: &JavaType, name: &str, want_static: Option<bool>) -> Option<JavaType> {
        self.find_field_at(receiver, name, want_static, 0)
    }

    fn find_field_at(
        &self,
        receiver: &JavaType,
        name: &str,
        want_static: Option<bool>,
        depth: usize,
    ) -> Option<JavaType> {
        let JavaType::Class { fqn, args } = receiver else { return None };
        if depth > MAX_SUPERTYPE_DEPTH {
            return None;
        }
        let info = self.class_info(fqn)?;
        let bindings = info.bindings_for(args);
        if let Some(field) = info.fields.get(name) {
            if want_static.map_or(true, |s| !s || field.is_static) {
                return Some(field.ty.substitute(&bindings));
            }
        }
        info.supertypes
            .iter()
            .map(|sup| sup.substitute(&bindings))
            .find_map(|sup| self.find_field_at(&sup, name, want_static, depth + 1))
    }

    /// Expression that names a type (`Math`, `java.util.List`), if it does
    fn as_type_name(&self, node: &SyntaxNode) -> Option<JavaType> {
        let is_name_chain = node.descendants().all(|n| {
            matches!(n.raw_kind.as_str(), "identifier" | "field_access" | "scoped_identifier" | "type_identifier")
        });
        if !is_name_chain {
            return None;
        }
        if node.raw_kind == "identifier" && self.lookup_variable(&node.text()).is_known() {
            return None;
        }
        let dotted = qualified_text(node);
        match self.resolve_type_name(&dotted, &self.snapshot()) {
            JavaType::Class { fqn, .. } if self.class_info(&fqn).is_some() || JAVA_CATALOG.knows_type(&fqn) => {
                Some(JavaType::class(fqn))
            }
            JavaType::Class { fqn, .. } if !dotted.contains('.') => Some(JavaType::class(fqn)),
            _ => None,
        }
    }

    fn argument_types(&self, node: &SyntaxNode) -> Vec<JavaType> {
        node.child_by_field("arguments")
            .map(|args| args.child_nodes().map(|a| self.type_of_expr(a)).collect())
            .unwrap_or_default()
    }

    fn type_of_invocation(&self, node: &SyntaxNode) -> JavaType {
        let Some(name) = node.child_by_field("name").map(SyntaxNode::text) else {
            return JavaType::Unknown;
        };
        if node.child_by_field("type_arguments").is_some() {
            // Explicit method type arguments are not modelled
            return JavaType::Unknown;
        }
        let args = self.argument_types(node);

        let result = match node.child_by_field("object") {
            None => self.enclosing.iter().rev().find_map(|ctx| {
                let receiver = self.class_info(&ctx.fqn).map(this_type_of)?;
                self.find_method(&receiver, &name, &args, None)
            }),
            Some(object) if object.raw_kind == "super" => None,
            Some(object) => {
                let receiver = self.type_of_expr(object);
                if receiver.is_known() {
                    self.find_method(&receiver.boxed(), &name, &args, Some(false))
                } else {
                    self.as_type_name(object)
                        .and_then(|ty| self.find_method(&ty, &name, &args, Some(true)))
                }
            }
        };
        result.unwrap_or(JavaType::Unknown)
    }

    fn type_of_field_access(&self, node: &SyntaxNode) -> JavaType {
        let (Some(object), Some(field)) = (node.child_by_field("object"), node.child_by_field("field")) else {
            return JavaType::Unknown;
        };
        let field = field.text();
        let receiver = self.type_of_expr(object);
        if let JavaType::Array(_) = receiver {
            return if field == "length" {
                JavaType::primitive("int")
            } else {
                JavaType::Unknown
            };
        }
        if receiver.is_known() {
            return self.find_field(&receiver, &field, None).unwrap_or(JavaType::Unknown);
        }
        self.as_type_name(object)
            .and_then(|ty| self.find_field(&ty, &field, Some(true)))
            .unwrap_or(JavaType::Unknown)
    }

    fn type_of_creation(&self, node: &SyntaxNode) -> JavaType {
        let scope = self.snapshot();
        let Some(type_node) = node.child_by_field("type") else {
            return JavaType::Unknown;
        };
        if node.children.first().is_some_and(|c| matches!(c, SyntaxElement::Node(_))) {
            // outer.new Inner()
            return JavaType::Unknown;
        }
        let diamond = type_node.raw_kind == "generic_type"
            && type_node
                .child_nodes()
                .find(|c| c.raw_kind == "type_arguments")
                .is_some_and(|args| args.child_nodes().next().is_none());
        let mut ty = self.resolve_type_node(type_node, &scope);
        if diamond {
            // `var` sees the diamond inferred from no target: every argument is Object
            ty = match ty {
                JavaType::Class { fqn, .. } => match self.class_info(&fqn).map(|c| c.type_params.len()) {
                    Some(arity) if arity > 0 => JavaType::generic(fqn, vec![JavaType::object(); arity]),
                    _ => JavaType::Unknown,
                },
                other => other,
            };
        }
        if node.child_by_raw_kind("class_body").is_some() {
            return JavaType::Anonymous(Box::new(ty));
        }
        ty
    }

    fn type_of_array_creation(&self, node: &SyntaxNode) -> JavaType {
        let scope = self.snapshot();
        let Some(element) = node.child_by_field("type").map(|t| self.resolve_type_node(t, &scope)) else {
            return JavaType::Unknown;
        };
        let sized = node
            .child_nodes()
            .filter(|c| c.raw_kind == "dimensions_expr")
            .count();
        let unsized_dims: usize = node
            .child_nodes()
            .filter(|c| c.raw_kind == "dimensions")
            .map(|d| d.tokens().iter().filter(|t| t.text == "[").count())
            .sum();
        wrap_array(element, sized + unsized_dims)
    }

    fn type_of_binary(&self, node: &SyntaxNode) -> JavaType {
        let left = node
            .child_by_field("left")
            .map(|l| self.type_of_expr(l))
            .unwrap_or(JavaType::Unknown);
        let right = node
            .child_by_field("right")
            .map(|r| self.type_of_expr(r))
            .unwrap_or(JavaType::Unknown);
        let Some(operator) = operator_of(node) else {
            return JavaType::Unknown;
        };
        if COMPARISON_OPERATORS.contains(&operator) {
            return JavaType::primitive("boolean");
        }
        match operator {
            "+" if left.is_string() || right.is_string() => JavaType::string(),
            "<<" | ">>" | ">>>" => left.promote_unary(),
            "&" | "|" | "^" if left.unboxed().is_primitive("boolean") => JavaType::primitive("boolean"),
            _ => left.promote_binary(&right),
        }
    }

    fn type_of_ternary(&self, node: &SyntaxNode) -> JavaType {
        let (Some(then_node), Some(else_node)) =
            (node.child_by_field("consequence"), node.child_by_field("alternative"))
        else {
            return JavaType::Unknown;
        };
        let binds_patterns = node.child_by_field("condition").is_some_and(|condition| {
            let (when_true, when_false) = self.condition_bindings(condition);
            !when_true.is_empty() || !when_false.is_empty()
        });
        if binds_patterns {
            // Branches would see pattern variables the expression walk does not model
            return JavaType::Unknown;
        }
        let (then, otherwise) = (self.type_of_expr(then_node), self.type_of_expr(else_node));
        match (&then, &otherwise) {
            _ if then == otherwise => then,
            (JavaType::Null, other) | (other, JavaType::Null) if matches!(other, JavaType::Class { .. }) => {
                other.clone()
            }
            _ if then.is_numeric() && otherwise.is_numeric() => {
                numeric_conditional((then_node, &then), (else_node, &otherwise))
            }
            _ => JavaType::Unknown,
        }
    }
}

/// Type of a conditional whose branches are both numeric (JLS 15.25.2)
fn numeric_conditional(a: (&SyntaxNode, &JavaType), b: (&SyntaxNode, &JavaType)) -> JavaType {
    let (unboxed_a, unboxed_b) = (a.1.unboxed(), b.1.unboxed());
    if unboxed_a == unboxed_b {
        return unboxed_a;
    }

    // `T` against an `int` constant representable in `T`
    for ((_, narrow), (wide_node, wide)) in [(a, b), (b, a)] {
        let JavaType::Primitive(name) = narrow.unboxed() else { continue };
        let Some(range) = small_int_range(&name) else { continue };
        if !wide.is_primitive("int") {
            continue;
        }
        return match int_constant(wide_node) {
            Some(value) if range.contains(&value) => JavaType::Primitive(name),
            Some(_) => JavaType::primitive("int"),
            None if may_be_constant(wide_node) => JavaType::Unknown,
            None => JavaType::primitive("int"),
        };
    }

    let is_byte_or_short = |ty: &JavaType| ty.is_primitive("byte") || ty.is_primitive("short");
    if is_byte_or_short(&unboxed_a) && is_byte_or_short(&unboxed_b) {
        return JavaType::primitive("short");
    }
    a.1.promote_binary(b.1)
}

fn small_int_range(primitive: &str) -> Option<std::ops::RangeInclusive<i64>> {
    match primitive {
        "byte" => Some(i8::MIN as i64..=i8::MAX as i64),
        "short" => Some(i16::MIN as i64..=i16::MAX as i64),
        "char" => Some(0..=u16::MAX as i64),
        _ => None,
    }
}

/// Value of an `int` constant expression built from literals
fn int_constant(node: &SyntaxNode) -> Option<i64> {
    let value = match node.raw_kind.as_str() {
        "decimal_integer_literal" | "hex_integer_literal" | "octal_integer_literal"
        | "binary_integer_literal" => parse_int_literal(&node.text())?,
        "character_literal" => {
            let text = node.text();
            let mut chars = text.strip_prefix('\'').and_then(|t| t.strip_suffix('\''))?.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c != '\\' => c as i64,
                _ => return None,
            }
        }
        "parenthesized_expression" => int_constant(node.child_nodes().next()?)?,
        "unary_expression" => {
            let operand = int_constant(node.child_by_field("operand")?)?;
            match operator_of(node)? {
                "-" => -operand,
                "+" => operand,
                "~" => !operand,
                _ => return None,
            }
        }
        "binary_expression" => {
            let left = int_constant(node.child_by_field("left")?)?;
            let right = int_constant(node.child_by_field("right")?)?;
            match operator_of(node)? {
                "+" => left.wrapping_add(right),
                "-" => left.wrapping_sub(right),
                "*" => left.wrapping_mul(right),
                "/" => left.checked_div(right)?,
                "%" => left.checked_rem(right)?,
                "&" => left & right,
                "|" => left | right,
                "^" => left ^ right,
                "<<" => ((left as i32).wrapping_shl(right as u32)) as i64,
                ">>" => ((left as i32).wrapping_shr(right as u32)) as i64,
                _ => return None,
            }
        }
        _ => return None,
    };
    Some(value as i32 as i64)
}

fn parse_int_literal(text: &str) -> Option<i64> {
    let digits = text.replace('_', "");
    let (radix, body) = if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        (16, hex.to_string())
    } else if let Some(bin) = digits.strip_prefix("0b").or_else(|| digits.strip_prefix("0B")) {
        (2, bin.to_string())
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, digits[1..].to_string())
    } else {
        return digits.parse::<i64>().ok();
    };
    u32::from_str_radix(&body, radix).ok().map(|v| v as i32 as i64)
}

/// Whether a constant expression could hide behind `node` (named constants, casts)
fn may_be_constant(node: &SyntaxNode) -> bool {
    match node.raw_kind.as_str() {
        "identifier" | "field_access" | "cast_expression" | "ternary_expression" => true,
        "parenthesized_expression" | "unary_expression" | "binary_expression" => {
            node.child_nodes().all(may_be_constant_operand)
        }
        _ => false,
    }
}

fn may_be_constant_operand(node: &SyntaxNode) -> bool {
    int_constant(node).is_some() || may_be_constant(node) || node.raw_kind == "character_literal"
}

pub(super) fn operator_of(node: &SyntaxNode) -> Option<&str> {
    node.children
        .iter()
        .filter_map(SyntaxElement::as_token)
        .map(|t| t.text.as_str())
        .next()
}

/// Substitute the `$`-variables of a catalog template with argument types
fn apply_argument_templates(template: &JavaType, args: &[JavaType]) -> JavaType {
    let dollar_vars = ["$0", "$1", "$2", "$all", "$num"].map(String::from);
    if !template.mentions_type_variable(&dollar_vars) {
        return template.clone();
    }
    if args.iter().any(|a| !a.is_known() || matches!(a, JavaType::Function)) {
        return JavaType::Unknown;
    }
    let mut bindings: FxHashMap<String, JavaType> = FxHashMap::default();
    for (i, arg) in args.iter().enumerate().take(3) {
        let arg = if matches!(arg, JavaType::Null) { JavaType::object() } else { arg.clone() };
        bindings.insert(format!("${}", i), arg);
    }
    let common = match args.split_first() {
        None => Some(JavaType::object()),
        Some((first, rest)) => {
            let first = first.boxed();
            rest.iter().all(|a| a.boxed() == first).then_some(first)
        }
    };
    if let Some(common) = common {
        bindings.insert("$all".to_string(), common);
    }
    let numeric = args
        .iter()
        .skip(1)
        .fold(args.first().map(JavaType::promote_unary), |acc, a| {
            acc.map(|acc| acc.promote_binary(a))
        });
    if let Some(numeric) = numeric.filter(JavaType::is_known) {
        bindings.insert("$num".to_string(), numeric);
    }
    let result = template.substitute(&bindings);
    if result.mentions_type_variable(&dollar_vars) {
        JavaType::Unknown
    } else {
        result
    }
}
