//! Java type-name binding
//!
//! Resolution order for a simple name (JLS 6.4.1 shadowing): type variables
//! and local classes, enclosing and member types, types declared in the
//! unit, single-type imports, same-package types, then on-demand imports
//! together with `java.lang`.

use rustc_hash::{FxHashMap, FxHashSet};

use super::java_catalog::JAVA_CATALOG;
use crate::features::semantic::domain::NameBinding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalType {
    TypeVariable,
    /// Local class; spelled by its simple name
    LocalClass,
}

/// Type names visible at one location
#[derive(Debug, Clone, Default)]
pub struct ScopeSnapshot {
    /// Enclosing named types, innermost first
    pub enclosing: Vec<String>,
    pub local_types: FxHashMap<String, LocalType>,
}

#[derive(Debug, Clone, Default)]
pub struct NameTable {
    pub package: Option<String>,
    /// simple name → fqn
    pub single_imports: FxHashMap<String, String>,
    /// Packages (or types) imported with `.*`
    pub on_demand: Vec<String>,
    /// Top-level types declared in the unit: simple name → fqn
    pub unit_types: FxHashMap<String, String>,
    /// Member types of unit types: owner fqn → simple names
    pub member_types: FxHashMap<String, Vec<String>>,
    /// Top-level types of sibling files in the same package
    pub same_package: FxHashSet<String>,
}

impl NameTable {
    pub fn qualify(&self, simple: &str) -> String {
        match &self.package {
            Some(package) => format!("{}.{}", package, simple),
            None => simple.to_string(),
        }
    }

    pub fn bind(&self, simple: &str, scope: &ScopeSnapshot) -> NameBinding {
        if scope.local_types.contains_key(simple) {
            return NameBinding::Type(simple.to_string());
        }
        for owner in &scope.enclosing {
            if owner.rsplit('.').next() == Some(simple) {
                return NameBinding::Type(owner.clone());
            }
            let declared = self
                .member_types
                .get(owner)
                .is_some_and(|members| members.iter().any(|m| m == simple));
            if declared {
                return NameBinding::Type(format!("{}.{}", owner, simple));
            }
        }
        if let Some(fqn) = self.unit_types.get(simple) {
            return NameBinding::Type(fqn.clone());
        }
        if let Some(fqn) = self.single_imports.get(simple) {
            return NameBinding::Type(fqn.clone());
        }
        if self.same_package.contains(simple) {
            return NameBinding::Type(self.qualify(simple));
        }
        self.bind_on_demand(simple)
    }

    fn bind_on_demand(&self, simple: &str) -> NameBinding {
        let mut found: FxHashSet<String> = FxHashSet::default();
        let mut opaque = false;
        for owner in self.on_demand.iter().map(String::as_str).chain(["java.lang"]) {
            if let Some(fqn) = self.member_of(owner, simple) {
                found.insert(fqn);
            } else if !JAVA_CATALOG.knows_owner(owner) && !self.is_unit_owner(owner) {
                opaque = true;
            }
        }
        match found.len() {
            0 => NameBinding::Unbound,
            // An unknown package may declare the same name
            1 if opaque => NameBinding::Ambiguous,
            1 => found
                .into_iter()
                .next()
                .map_or(NameBinding::Unbound, NameBinding::Type),
            _ => NameBinding::Ambiguous,
        }
    }

    fn member_of(&self, owner: &str, simple: &str) -> Option<String> {
        let in_unit = self
            .member_types
            .get(owner)
            .is_some_and(|members| members.iter().any(|m| m == simple));
        if in_unit {
            return Some(format!("{}.{}", owner, simple));
        }
        JAVA_CATALOG.member(owner, simple)
    }

    fn is_unit_owner(&self, owner: &str) -> bool {
        self.member_types.contains_key(owner)
            || self.package.as_deref() == Some(owner)
    }

    /// Resolve a dotted type name (`Map.Entry`, `java.util.List`) to a fqn
    pub fn resolve_qualified(&self, dotted: &str, scope: &ScopeSnapshot) -> Option<String> {
        let (head, rest) = dotted.split_once('.')?;
        match self.bind(head, scope) {
            NameBinding::Type(fqn) => Some(format!("{}.{}", fqn, rest)),
            NameBinding::Ambiguous => None,
            // Package-qualified
            NameBinding::Unbound => Some(dotted.to_string()),
        }
    }
}
