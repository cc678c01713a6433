//! Local semantic analysis of one Java compilation unit
//!
//! Three passes over the lossless tree:
//! 1. names: package, imports and type declarations
//! 2. members: fields, methods, record components and enum constants
//! 3. bodies: a scoped walk that types every `var` initializer
//!
//! Anything the analysis cannot prove ends up as `JavaType::Unknown`.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::java_catalog::{ClassInfo, FieldInfo, MethodInfo};
use super::java_names::{LocalType, NameTable, ScopeSnapshot};
use super::java_expressions::operator_of;
use super::java_types::{qualified_text, type_from_node, wrap_array, JavaType};
use crate::features::semantic::domain::{NameBinding, TypeSymbol};
use crate::features::semantic::ports::SemanticModel;
use crate::features::syntax::{NodeId, SyntaxKind, SyntaxNode};
use crate::shared::utils::scope_stack::ScopeStack;

const PLACEHOLDER: &str = "var";

const TYPE_DECLARATIONS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

/// Semantic model produced by [`JavaAnalyzer`]
#[derive(Debug, Default)]
pub struct JavaSemanticModel {
    slot_types: FxHashMap<NodeId, TypeSymbol>,
    slot_scopes: FxHashMap<NodeId, ScopeSnapshot>,
    names: NameTable,
}

impl JavaSemanticModel {
    pub fn slot_count(&self) -> usize {
        self.slot_types.len()
    }
}

impl SemanticModel for JavaSemanticModel {
    fn type_of(&self, slot: NodeId) -> Option<TypeSymbol> {
        self.slot_types.get(&slot).cloned()
    }

    fn bind_type_name(&self, simple_name: &str, at: NodeId) -> NameBinding {
        match self.slot_scopes.get(&at) {
            Some(scope) => self.names.bind(simple_name, scope),
            None => self.names.bind(simple_name, &ScopeSnapshot::default()),
        }
    }
}

#[derive(Debug, Clone)]
pub(super) struct TypeContext {
    /// fqn of the named type, or of the base type for anonymous classes
    pub fqn: String,
    pub anonymous: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclPosition {
    TopLevel,
    Member,
    Local,
}

pub struct JavaAnalyzer {
    pub(super) names: NameTable,
    pub(super) classes: FxHashMap<String, ClassInfo>,
    pub(super) vars: ScopeStack<JavaType>,
    pub(super) local_types: ScopeStack<LocalType>,
    pub(super) enclosing: Vec<TypeContext>,
    slot_types: FxHashMap<NodeId, TypeSymbol>,
    slot_scopes: FxHashMap<NodeId, ScopeSnapshot>,
}

impl JavaAnalyzer {
    pub fn new(same_package: impl IntoIterator<Item = String>) -> Self {
        let mut names = NameTable::default();
        names.same_package.extend(same_package);
        Self {
            names,
            classes: FxHashMap::default(),
            vars: ScopeStack::new(),
            local_types: ScopeStack::new(),
            enclosing: Vec::new(),
            slot_types: FxHashMap::default(),
            slot_scopes: FxHashMap::default(),
        }
    }

    pub fn analyze(mut self, root: &SyntaxNode) -> JavaSemanticModel {
        self.collect_header(root);
        let mut declarations = Vec::new();
        self.collect_type_declarations(root, None, &mut declarations);
        for (fqn, decl) in &declarations {
            self.collect_members(fqn, decl, &declarations);
        }
        self.visit(root);

        debug!(
            slots = self.slot_types.len(),
            types = declarations.len(),
            "java analysis finished"
        );
        JavaSemanticModel {
            slot_types: self.slot_types,
            slot_scopes: self.slot_scopes,
            names: self.names,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Pass 1: names
    // ═══════════════════════════════════════════════════════════════════

    fn collect_header(&mut self, root: &SyntaxNode) {
        for child in root.child_nodes() {
            match child.raw_kind.as_str() {
                "package_declaration" => {
                    let name = child
                        .child_nodes()
                        .find(|n| n.raw_kind == "scoped_identifier" || n.raw_kind == "identifier");
                    self.names.package = name.map(qualified_text);
                }
                "import_declaration" => {
                    if child.has_token("static") {
                        continue;
                    }
                    let Some(name) = child
                        .child_nodes()
                        .find(|n| n.raw_kind == "scoped_identifier" || n.raw_kind == "identifier")
                    else {
                        continue;
                    };
                    let dotted = qualified_text(name);
                    if child.child_by_raw_kind("asterisk").is_some() {
                        self.names.on_demand.push(dotted);
                    } else if let Some((_, simple)) = dotted.rsplit_once('.') {
                        self.names
                            .single_imports
                            .insert(simple.to_string(), dotted.clone());
                    }
                }
                _ => {}
            }
        }
    }

    fn collect_type_declarations<'t>(
        &mut self,
        node: &'t SyntaxNode,
        owner: Option<&str>,
        out: &mut Vec<(String, &'t SyntaxNode)>,
    ) {
        for child in node.child_nodes() {
            if TYPE_DECLARATIONS.contains(&child.raw_kind.as_str()) {
                let Some(simple) = child.child_by_field("name").map(SyntaxNode::text) else {
                    continue;
                };
                let fqn = match owner {
                    Some(owner) => {
                        self.names
                            .member_types
                            .entry(owner.to_string())
                            .or_default()
                            .push(simple.clone());
                        format!("{}.{}", owner, simple)
                    }
                    None => {
                        let fqn = self.names.qualify(&simple);
                        self.names.unit_types.insert(simple.clone(), fqn.clone());
                        fqn
                    }
                };
                self.names.member_types.entry(fqn.clone()).or_default();
                let mut info = ClassInfo::new(fqn.clone());
                info.type_params = type_parameter_names(child);
                self.classes.insert(fqn.clone(), info);
                out.push((fqn.clone(), child));
                if let Some(body) = child.child_by_field("body") {
                    self.collect_type_declarations(body, Some(&fqn), out);
                }
            } else if child.kind == SyntaxKind::TypeBody {
                // enum_body_declarations nests members one level deeper
                self.collect_type_declarations(child, owner, out);
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Pass 2: members
    // ═══════════════════════════════════════════════════════════════════

    /// Scope of a type declaration: its own and enclosing type parameters
    fn declaration_scope(&self, fqn: &str, declarations: &[(String, &SyntaxNode)]) -> ScopeSnapshot {
        let mut scope = ScopeSnapshot::default();
        let mut current = Some(fqn.to_string());
        while let Some(owner) = current {
            if let Some(info) = self.classes.get(&owner) {
                for param in &info.type_params {
                    scope
                        .local_types
                        .entry(param.clone())
                        .or_insert(LocalType::TypeVariable);
                }
            }
            let parent = owner.rsplit_once('.').map(|(p, _)| p.to_string());
            current = parent.filter(|p| declarations.iter().any(|(f, _)| f == p));
            scope.enclosing.push(owner);
        }
        scope
    }

    fn collect_members(&mut self, fqn: &str, decl: &SyntaxNode, declarations: &[(String, &SyntaxNode)]) {
        let scope = self.declaration_scope(fqn, declarations);
        let mut info = self.classes.get(fqn).cloned().unwrap_or_else(|| ClassInfo::new(fqn));
        let is_interface = decl.raw_kind == "interface_declaration";

        for field in ["superclass", "interfaces"] {
            if let Some(clause) = decl.child_by_field(field) {
                info.supertypes.extend(self.supertypes_in(clause, &scope));
            }
        }
        if let Some(clause) = decl.child_by_raw_kind("extends_interfaces") {
            info.supertypes.extend(self.supertypes_in(clause, &scope));
        }

        let this_type = self_type(&info);
        if decl.raw_kind == "record_declaration" {
            if let Some(params) = decl.child_by_field("parameters") {
                for param in params.child_nodes().filter(|p| p.raw_kind == "formal_parameter") {
                    let (Some(name), Some(ty)) = (param.child_by_field("name"), param.child_by_field("type")) else {
                        continue;
                    };
                    let ty = self.resolve_type_node(ty, &scope);
                    info.fields.insert(name.text(), FieldInfo { ty: ty.clone(), is_static: false });
                    info.add_method(name.text(), MethodInfo {
                        arity: Some(0),
                        returns: ty,
                        is_static: false,
                        type_params: Vec::new(),
                    });
                }
            }
        }

        if let Some(body) = decl.child_by_field("body") {
            let members = body.child_nodes().flat_map(|m| {
                if m.raw_kind == "enum_body_declarations" {
                    m.child_nodes().collect::<Vec<_>>()
                } else {
                    vec![m]
                }
            });
            for member in members {
                match member.raw_kind.as_str() {
                    "field_declaration" | "constant_declaration" => {
                        let is_static = is_interface
                            || member.raw_kind == "constant_declaration"
                            || has_modifier(member, "static");
                        let Some(ty) = member.child_by_field("type") else { continue };
                        let base = self.resolve_type_node(ty, &scope);
                        for declarator in member.children_by_field("declarator") {
                            let Some(name) = declarator.child_by_field("name") else { continue };
                            let ty = wrap_array(base.clone(), dimension_count(declarator));
                            info.fields.insert(name.text(), FieldInfo { ty, is_static });
                        }
                    }
                    "method_declaration" => {
                        let Some(name) = member.child_by_field("name") else { continue };
                        let type_params = type_parameter_names(member);
                        let mut method_scope = scope.clone();
                        for param in &type_params {
                            method_scope.local_types.insert(param.clone(), LocalType::TypeVariable);
                        }
                        let returns = match member.child_by_field("type") {
                            Some(ty) if ty.raw_kind == "void_type" => JavaType::Error("void".to_string()),
                            Some(ty) => wrap_array(
                                self.resolve_type_node(ty, &method_scope),
                                dimension_count(member),
                            ),
                            None => JavaType::Unknown,
                        };
                        info.add_method(name.text(), MethodInfo {
                            arity: parameter_arity(member),
                            returns,
                            is_static: has_modifier(member, "static"),
                            type_params,
                        });
                    }
                    "enum_constant" => {
                        if let Some(name) = member.child_by_field("name") {
                            info.fields.insert(name.text(), FieldInfo { ty: this_type.clone(), is_static: true });
                        }
                    }
                    _ => {}
                }
            }
        }

        if decl.raw_kind == "enum_declaration" {
            let statics = [
                ("values", JavaType::Array(Box::new(this_type.clone())), Some(0)),
                ("valueOf", this_type.clone(), Some(1)),
            ];
            for (name, returns, arity) in statics {
                info.add_method(name, MethodInfo { arity, returns, is_static: true, type_params: Vec::new() });
            }
            info.add_method("ordinal", MethodInfo {
                arity: Some(0),
                returns: JavaType::primitive("int"),
                is_static: false,
                type_params: Vec::new(),
            });
            info.add_method("name", MethodInfo {
                arity: Some(0),
                returns: JavaType::string(),
                is_static: false,
                type_params: Vec::new(),
            });
        }

        self.classes.insert(fqn.to_string(), info);
    }

    fn supertypes_in(&self, clause: &SyntaxNode, scope: &ScopeSnapshot) -> Vec<JavaType> {
        let types: Vec<&SyntaxNode> = match clause.child_by_raw_kind("type_list") {
            Some(list) => list.child_nodes().filter(|n| n.kind.is_type_reference()).collect(),
            None => clause.child_nodes().filter(|n| n.kind.is_type_reference()).collect(),
        };
        types
            .into_iter()
            .map(|t| self.resolve_type_node(t, scope))
            .filter(JavaType::is_known)
            .collect()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Type resolution
    // ═══════════════════════════════════════════════════════════════════

    pub(super) fn resolve_type_node(&self, node: &SyntaxNode, scope: &ScopeSnapshot) -> JavaType {
        type_from_node(node, &|name: &str| self.resolve_type_name(name, scope))
    }

    pub(super) fn resolve_type_name(&self, name: &str, scope: &ScopeSnapshot) -> JavaType {
        if !name.contains('.') {
            match scope.local_types.get(name) {
                Some(LocalType::TypeVariable) => return JavaType::TypeVariable(name.to_string()),
                Some(LocalType::LocalClass) => return JavaType::class(name),
                None => {}
            }
            return match self.names.bind(name, scope) {
                NameBinding::Type(fqn) => JavaType::class(fqn),
                _ => JavaType::Unknown,
            };
        }
        match self.names.resolve_qualified(name, scope) {
            Some(fqn) => JavaType::class(fqn),
            None => JavaType::Unknown,
        }
    }

    /// Scope at the current walk position
    pub(super) fn snapshot(&self) -> ScopeSnapshot {
        ScopeSnapshot {
            enclosing: self
                .enclosing
                .iter()
                .rev()
                .filter(|ctx| !ctx.anonymous)
                .map(|ctx| ctx.fqn.clone())
                .collect(),
            local_types: self.local_types.flatten(),
        }
    }

    pub(super) fn class_info(&self, fqn: &str) -> Option<&ClassInfo> {
        self.classes
            .get(fqn)
            .or_else(|| super::java_catalog::JAVA_CATALOG.class(fqn))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Pass 3: bodies
    // ═══════════════════════════════════════════════════════════════════

    fn visit(&mut self, node: &SyntaxNode) {
        match node.raw_kind.as_str() {
            kind if TYPE_DECLARATIONS.contains(&kind) => {
                let position = if self.enclosing.is_empty() {
                    DeclPosition::TopLevel
                } else {
                    DeclPosition::Local
                };
                self.visit_type_declaration(node, position)
            }
            "method_declaration" | "constructor_declaration" | "compact_constructor_declaration" => {
                self.visit_method(node)
            }
            "lambda_expression" => self.visit_lambda(node),
            "local_variable_declaration" => self.visit_local_declaration(node),
            "enhanced_for_statement" => self.visit_enhanced_for(node),
            "resource" => self.visit_resource(node),
            "catch_clause" => self.visit_catch(node),
            "object_creation_expression" => self.visit_object_creation(node),
            "if_statement" => self.visit_conditional(node, "consequence", Some("alternative")),
            "while_statement" => self.visit_conditional(node, "body", None),
            "block" | "constructor_body" => {
                self.vars.push();
                self.local_types.push();
                self.visit_statements(node);
                self.local_types.pop();
                self.vars.pop();
            }
            "switch_block_statement_group" | "switch_rule" => {
                self.vars.push();
                self.local_types.push();
                for label in node.child_nodes().filter(|c| c.raw_kind == "switch_label") {
                    for (name, ty) in self.label_bindings(label) {
                        self.vars.declare(name, ty);
                    }
                }
                self.visit_statements(node);
                self.local_types.pop();
                self.vars.pop();
            }
            "for_statement" | "try_with_resources_statement" => {
                self.vars.push();
                self.local_types.push();
                self.visit_children(node);
                self.local_types.pop();
                self.vars.pop();
            }
            _ => self.visit_children(node),
        }
    }

    fn visit_children(&mut self, node: &SyntaxNode) {
        for child in node.child_nodes() {
            self.visit(child);
        }
    }

    fn visit_type_declaration(&mut self, node: &SyntaxNode, position: DeclPosition) {
        let simple = node.child_by_field("name").map(SyntaxNode::text).unwrap_or_default();
        let fqn = match (position, self.enclosing.last()) {
            (DeclPosition::Member, Some(outer)) => format!("{}.{}", outer.fqn, simple),
            (DeclPosition::TopLevel, _) | (DeclPosition::Member, None) => self.names.qualify(&simple),
            (DeclPosition::Local, _) => {
                self.local_types.declare(simple.clone(), LocalType::LocalClass);
                simple.clone()
            }
        };
        let type_params = type_parameter_names(node);
        self.enclosing.push(TypeContext { fqn, anonymous: false });
        self.vars.push();
        self.local_types.push();
        for param in type_params {
            self.local_types.declare(param, LocalType::TypeVariable);
        }
        if let Some(body) = node.child_by_field("body") {
            self.visit_type_body(body);
        }
        self.local_types.pop();
        self.vars.pop();
        self.enclosing.pop();
    }

    fn visit_type_body(&mut self, body: &SyntaxNode) {
        for member in body.child_nodes() {
            if TYPE_DECLARATIONS.contains(&member.raw_kind.as_str()) {
                self.visit_type_declaration(member, DeclPosition::Member);
            } else if member.raw_kind == "enum_body_declarations" {
                self.visit_type_body(member);
            } else {
                self.visit(member);
            }
        }
    }

    fn visit_object_creation(&mut self, node: &SyntaxNode) {
        let Some(body) = node.child_by_raw_kind("class_body") else {
            self.visit_children(node);
            return;
        };
        for child in node.child_nodes().filter(|c| c.id != body.id) {
            self.visit(child);
        }
        let base = node
            .child_by_field("type")
            .map(|t| self.resolve_type_node(t, &self.snapshot()))
            .and_then(|t| t.class_fqn().map(str::to_string))
            .unwrap_or_else(|| super::java_types::OBJECT.to_string());
        self.enclosing.push(TypeContext { fqn: base, anonymous: true });
        self.vars.push();
        // Fields of the anonymous body shadow outer locals
        for member in body.child_nodes().filter(|m| m.raw_kind == "field_declaration") {
            self.declare_fields(member);
        }
        self.visit_children(body);
        self.vars.pop();
        self.enclosing.pop();
    }

    fn declare_fields(&mut self, field: &SyntaxNode) {
        let scope = self.snapshot();
        let Some(ty) = field.child_by_field("type") else { return };
        let base = self.resolve_type_node(ty, &scope);
        for declarator in field.children_by_field("declarator") {
            if let Some(name) = declarator.child_by_field("name") {
                self.vars.declare(name.text(), wrap_array(base.clone(), dimension_count(declarator)));
            }
        }
    }

    fn visit_method(&mut self, node: &SyntaxNode) {
        self.vars.push();
        self.local_types.push();
        for param in type_parameter_names(node) {
            self.local_types.declare(param, LocalType::TypeVariable);
        }
        if let Some(params) = node.child_by_field("parameters") {
            self.declare_parameters(params);
        }
        if let Some(body) = node.child_by_field("body") {
            self.visit(body);
        }
        self.local_types.pop();
        self.vars.pop();
    }

    fn declare_parameters(&mut self, params: &SyntaxNode) {
        let scope = self.snapshot();
        for param in params.child_nodes() {
            match param.raw_kind.as_str() {
                "formal_parameter" => {
                    let (Some(name), Some(ty)) = (param.child_by_field("name"), param.child_by_field("type")) else {
                        continue;
                    };
                    let ty = if ty.text() == PLACEHOLDER {
                        JavaType::Unknown
                    } else {
                        wrap_array(self.resolve_type_node(ty, &scope), dimension_count(param))
                    };
                    self.vars.declare(name.text(), ty);
                }
                "spread_parameter" => {
                    let ty = param
                        .child_nodes()
                        .find(|n| n.kind.is_type_reference())
                        .map(|t| self.resolve_type_node(t, &scope))
                        .unwrap_or(JavaType::Unknown);
                    let name = param
                        .descendants()
                        .find(|n| n.raw_kind == "variable_declarator")
                        .and_then(|d| d.child_by_field("name"))
                        .or_else(|| param.child_by_raw_kind("identifier"));
                    if let Some(name) = name {
                        self.vars.declare(name.text(), JavaType::Array(Box::new(ty)));
                    }
                }
                "identifier" => self.vars.declare(param.text(), JavaType::Unknown),
                _ => {}
            }
        }
    }

    fn visit_lambda(&mut self, node: &SyntaxNode) {
        self.vars.push();
        if let Some(params) = node.child_by_field("parameters") {
            match params.raw_kind.as_str() {
                "identifier" => self.vars.declare(params.text(), JavaType::Unknown),
                "inferred_parameters" => {
                    for ident in params.child_nodes() {
                        self.vars.declare(ident.text(), JavaType::Unknown);
                    }
                }
                _ => self.declare_parameters(params),
            }
        }
        if let Some(body) = node.child_by_field("body") {
            self.visit(body);
        }
        self.vars.pop();
    }

    fn visit_catch(&mut self, node: &SyntaxNode) {
        self.vars.push();
        if let Some(param) = node.child_by_raw_kind("catch_formal_parameter") {
            let scope = self.snapshot();
            let ty = param
                .child_by_raw_kind("catch_type")
                .map(|ct| {
                    let types: Vec<&SyntaxNode> = ct.child_nodes().collect();
                    if types.len() == 1 {
                        self.resolve_type_node(types[0], &scope)
                    } else {
                        JavaType::Unknown
                    }
                })
                .unwrap_or(JavaType::Unknown);
            if let Some(name) = param.child_by_field("name") {
                self.vars.declare(name.text(), ty);
            }
        }
        if let Some(body) = node.child_by_field("body") {
            self.visit(body);
        }
        self.vars.pop();
    }

    /// Visit statements in order. Pattern variables an `if` or `while` may
    /// introduce after itself are masked as unknown for the statements that follow.
    fn visit_statements(&mut self, node: &SyntaxNode) {
        for child in node.child_nodes() {
            self.visit(child);
            for name in self.bindings_after(child) {
                self.vars.declare(name, JavaType::Unknown);
            }
        }
    }

    fn bindings_after(&self, statement: &SyntaxNode) -> Vec<String> {
        let loop_or_if = matches!(statement.raw_kind.as_str(), "if_statement" | "while_statement");
        let Some(condition) = statement.child_by_field("condition").filter(|_| loop_or_if) else {
            return Vec::new();
        };
        let (when_true, when_false) = self.condition_bindings(condition);
        let has_else = statement.child_by_field("alternative").is_some();
        when_false
            .into_iter()
            .chain(when_true.into_iter().filter(|_| has_else))
            .map(|(name, _)| name)
            .collect()
    }

    /// `if` / `while`: each branch sees the bindings its condition guarantees
    fn visit_conditional(&mut self, node: &SyntaxNode, then_field: &str, else_field: Option<&str>) {
        let (when_true, when_false) = match node.child_by_field("condition") {
            Some(condition) => {
                self.visit(condition);
                self.condition_bindings(condition)
            }
            None => Default::default(),
        };
        let branches = [(Some(then_field), when_true), (else_field, when_false)];
        for (field, bindings) in branches {
            let Some(branch) = field.and_then(|f| node.child_by_field(f)) else { continue };
            self.vars.push();
            for (name, ty) in bindings {
                self.vars.declare(name, ty);
            }
            self.visit(branch);
            self.vars.pop();
        }
    }

    /// Pattern variables definitely matched when `expr` is true, and when it is false
    pub(super) fn condition_bindings(&self, expr: &SyntaxNode) -> (Vec<(String, JavaType)>, Vec<(String, JavaType)>) {
        match expr.raw_kind.as_str() {
            "parenthesized_expression" => expr
                .child_nodes()
                .next()
                .map(|inner| self.condition_bindings(inner))
                .unwrap_or_default(),
            "instanceof_expression" => {
                let scope = self.snapshot();
                let bindings = match (expr.child_by_field("right"), expr.child_by_field("name"), expr.child_by_field("pattern")) {
                    (Some(ty), Some(name), _) => vec![(name.text(), self.resolve_type_node(ty, &scope))],
                    (_, _, Some(pattern)) => self.pattern_bindings(pattern),
                    _ => Vec::new(),
                };
                (bindings, Vec::new())
            }
            "unary_expression" if operator_of(expr) == Some("!") => {
                let (when_true, when_false) = expr
                    .child_by_field("operand")
                    .map(|operand| self.condition_bindings(operand))
                    .unwrap_or_default();
                (when_false, when_true)
            }
            "binary_expression" => {
                let side = |field: &str| {
                    expr.child_by_field(field)
                        .map(|operand| self.condition_bindings(operand))
                        .unwrap_or_default()
                };
                let ((left_true, left_false), (right_true, right_false)) = (side("left"), side("right"));
                match operator_of(expr) {
                    Some("&&") => ([left_true, right_true].concat(), Vec::new()),
                    Some("||") => (Vec::new(), [left_false, right_false].concat()),
                    _ => Default::default(),
                }
            }
            _ => Default::default(),
        }
    }

    /// Variables bound by the pattern of a `case` label
    fn label_bindings(&self, label: &SyntaxNode) -> Vec<(String, JavaType)> {
        label
            .child_nodes()
            .filter(|c| c.raw_kind == "pattern")
            .flat_map(|pattern| pattern.child_nodes())
            .flat_map(|pattern| self.pattern_bindings(pattern))
            .collect()
    }

    /// Variables bound by a type pattern or a (nested) record pattern
    fn pattern_bindings(&self, pattern: &SyntaxNode) -> Vec<(String, JavaType)> {
        match pattern.raw_kind.as_str() {
            "type_pattern" | "record_pattern_component" => {
                let scope = self.snapshot();
                let ty = pattern.child_nodes().find(|c| c.kind.is_type_reference());
                let name = pattern.child_nodes().filter(|c| c.raw_kind == "identifier").last();
                match (ty, name) {
                    (Some(ty), Some(name)) if ty.text() == PLACEHOLDER => vec![(name.text(), JavaType::Unknown)],
                    (Some(ty), Some(name)) => vec![(name.text(), self.resolve_type_node(ty, &scope))],
                    _ => Vec::new(),
                }
            }
            "record_pattern" => pattern
                .child_by_raw_kind("record_pattern_body")
                .map(|body| body.child_nodes().flat_map(|c| self.pattern_bindings(c)).collect())
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Record the inferred type of a `var` slot
    fn record_slot(&mut self, slot: &SyntaxNode, ty: &JavaType) {
        let symbol = ty.to_symbol();
        debug!(slot = %slot.id, line = slot.span.start_line, symbol = %symbol, "typed var slot");
        self.slot_types.insert(slot.id, symbol);
        self.slot_scopes.insert(slot.id, self.snapshot());
    }

    fn visit_local_declaration(&mut self, node: &SyntaxNode) {
        let scope = self.snapshot();
        let Some(slot) = node.child_by_field("type") else {
            self.visit_children(node);
            return;
        };
        let declarators: Vec<&SyntaxNode> = node.children_by_field("declarator").collect();
        let is_var = slot.text() == PLACEHOLDER;

        let inferred = if !is_var {
            None
        } else if declarators.len() != 1 {
            Some(JavaType::Error("'var' is not allowed in a compound declaration".into()))
        } else if dimension_count(declarators[0]) > 0 {
            Some(JavaType::Error("'var' is not allowed as an element type of an array".into()))
        } else {
            Some(match declarators[0].child_by_field("value") {
                Some(value) => self.type_of_expr(value).project_upward(),
                None => JavaType::Error("cannot infer type without initializer".into()),
            })
        };
        if let Some(ty) = &inferred {
            self.record_slot(slot, ty);
        }

        for declarator in &declarators {
            if let Some(value) = declarator.child_by_field("value") {
                self.visit(value);
            }
        }

        let declared = if is_var {
            JavaType::Unknown
        } else {
            self.resolve_type_node(slot, &scope)
        };
        for declarator in declarators {
            let Some(name) = declarator.child_by_field("name") else { continue };
            let ty = match &inferred {
                Some(ty) => ty.clone(),
                None => wrap_array(declared.clone(), dimension_count(declarator)),
            };
            self.vars.declare(name.text(), ty);
        }
    }

    fn visit_enhanced_for(&mut self, node: &SyntaxNode) {
        self.vars.push();
        let iterable = node
            .child_by_field("value")
            .map(|v| self.type_of_expr(v))
            .unwrap_or(JavaType::Unknown);
        let element = self.element_type(&iterable).project_upward();
        let ty = match node.child_by_field("type") {
            Some(slot) if slot.text() == PLACEHOLDER => {
                self.record_slot(slot, &element);
                element
            }
            Some(slot) => {
                let scope = self.snapshot();
                self.resolve_type_node(slot, &scope)
            }
            None => JavaType::Unknown,
        };
        if let Some(value) = node.child_by_field("value") {
            self.visit(value);
        }
        if let Some(name) = node.child_by_field("name") {
            self.vars.declare(name.text(), ty);
        }
        if let Some(body) = node.child_by_field("body") {
            self.visit(body);
        }
        self.vars.pop();
    }

    fn visit_resource(&mut self, node: &SyntaxNode) {
        let value_type = node.child_by_field("value").map(|v| self.type_of_expr(v));
        let ty = match (node.child_by_field("type"), value_type) {
            (Some(slot), Some(value)) if slot.text() == PLACEHOLDER => {
                let ty = value.project_upward();
                self.record_slot(slot, &ty);
                ty
            }
            (Some(slot), _) if slot.text() == PLACEHOLDER => {
                let ty = JavaType::Error("cannot infer type without initializer".into());
                self.record_slot(slot, &ty);
                ty
            }
            (Some(slot), _) => {
                let scope = self.snapshot();
                self.resolve_type_node(slot, &scope)
            }
            (None, _) => {
                self.visit_children(node);
                return;
            }
        };
        if let Some(value) = node.child_by_field("value") {
            self.visit(value);
        }
        if let Some(name) = node.child_by_field("name") {
            self.vars.declare(name.text(), ty);
        }
    }
}

fn self_type(info: &ClassInfo) -> JavaType {
    JavaType::generic(
        info.fqn.clone(),
        info.type_params
            .iter()
            .map(|p| JavaType::TypeVariable(p.clone()))
            .collect(),
    )
}

pub(super) fn this_type_of(info: &ClassInfo) -> JavaType {
    self_type(info)
}

fn type_parameter_names(node: &SyntaxNode) -> Vec<String> {
    node.child_by_field("type_parameters")
        .or_else(|| node.child_by_raw_kind("type_parameters"))
        .map(|params| {
            params
                .child_nodes()
                .filter(|p| p.raw_kind == "type_parameter")
                .filter_map(|p| {
                    p.child_nodes()
                        .find(|n| n.raw_kind == "type_identifier" || n.raw_kind == "identifier")
                        .map(SyntaxNode::text)
                })
                .collect()
        })
        .unwrap_or_default()
}

fn has_modifier(node: &SyntaxNode, modifier: &str) -> bool {
    node.child_by_raw_kind("modifiers")
        .is_some_and(|m| m.has_token(modifier))
}

fn dimension_count(node: &SyntaxNode) -> usize {
    node.child_by_field("dimensions")
        .map(|d| d.tokens().iter().filter(|t| t.text == "[").count())
        .unwrap_or(0)
}

fn parameter_arity(method: &SyntaxNode) -> Option<usize> {
    let params = method.child_by_field("parameters")?;
    if params.child_by_raw_kind("spread_parameter").is_some() {
        return None;
    }
    Some(
        params
            .child_nodes()
            .filter(|p| p.raw_kind == "formal_parameter")
            .count(),
    )
}
