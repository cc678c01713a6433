//! Which resolved types may replace a placeholder

use super::SkipReason;
use crate::features::semantic::{TypeKind, TypeSymbol};

#[derive(Debug, Clone, Copy)]
pub struct ExclusionPolicy {
    placeholder: &'static str,
}

impl ExclusionPolicy {
    pub fn new(placeholder: &'static str) -> Self {
        Self { placeholder }
    }

    /// Accept `symbol` or name the first rule that rejects it
    pub fn check<'s>(&self, symbol: Option<&'s TypeSymbol>) -> Result<&'s TypeSymbol, SkipReason> {
        let symbol = symbol.ok_or(SkipReason::Unresolved)?;
        match symbol.kind {
            TypeKind::Unknown => Err(SkipReason::Unknown),
            TypeKind::Error => Err(SkipReason::ErrorType),
            TypeKind::Anonymous => Err(SkipReason::Anonymous),
            TypeKind::Concrete if symbol.display == self.placeholder => {
                Err(SkipReason::PlaceholderSpelling)
            }
            TypeKind::Concrete => Ok(symbol),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_rules() {
        let policy = ExclusionPolicy::new("var");
        assert_eq!(policy.check(None).unwrap_err(), SkipReason::Unresolved);
        assert_eq!(
            policy.check(Some(&TypeSymbol::unknown())).unwrap_err(),
            SkipReason::Unknown
        );
        assert_eq!(
            policy.check(Some(&TypeSymbol::error("<null>"))).unwrap_err(),
            SkipReason::ErrorType
        );
        assert_eq!(
            policy.check(Some(&TypeSymbol::anonymous("<anonymous Object>"))).unwrap_err(),
            SkipReason::Anonymous
        );
        assert_eq!(
            policy.check(Some(&TypeSymbol::concrete("com.acme.var", "var"))).unwrap_err(),
            SkipReason::PlaceholderSpelling
        );
        let int = TypeSymbol::concrete("int", "int");
        assert_eq!(policy.check(Some(&int)).unwrap(), &int);
    }
}
