//! Resolve implicit declarations into rewrite candidates

use tracing::{debug, warn};

use crate::features::declaration_scan::ImplicitDeclaration;
use crate::features::semantic::SemanticModel;
use crate::features::syntax::{parse_type_name, Annotation, CompilationUnit};
use crate::features::type_resolution::domain::{
    ExclusionPolicy, Resolution, RewriteCandidate, SkipReason, SkippedSite,
};

pub struct TypeResolver {
    policy: ExclusionPolicy,
}

impl TypeResolver {
    pub fn new(policy: ExclusionPolicy) -> Self {
        Self { policy }
    }

    pub fn for_unit(unit: &CompilationUnit) -> Self {
        Self::new(ExclusionPolicy::new(unit.language().placeholder_keyword()))
    }

    /// Query the model for every site and keep the ones the policy accepts.
    ///
    /// A spelling that does not parse as a type only skips its own site.
    pub fn resolve<'a>(
        &self,
        unit: &CompilationUnit,
        model: &dyn SemanticModel,
        sites: impl IntoIterator<Item = ImplicitDeclaration<'a>>,
    ) -> Resolution {
        let mut ids = unit.id_allocator();
        let mut resolution = Resolution::default();

        for site in sites {
            let slot = site.type_slot;
            let symbol = model.type_of(slot.id);
            let symbol = match self.policy.check(symbol.as_ref()) {
                Ok(symbol) => symbol.clone(),
                Err(reason) => {
                    debug!(slot = %slot.id, line = site.line(), reason = reason.as_str(), "site skipped");
                    resolution.skipped.push(SkippedSite {
                        slot: slot.id,
                        line: site.line(),
                        reason,
                    });
                    continue;
                }
            };

            let replacement = match parse_type_name(&symbol.fully_qualified, &mut ids) {
                Ok(node) => node
                    .with_trivia_from(slot)
                    .with_field(slot.field.clone())
                    .with_span(slot.span)
                    .with_annotation(Annotation::Simplify { origin: slot.id }),
                Err(err) => {
                    warn!(
                        slot = %slot.id,
                        line = site.line(),
                        spelling = %symbol.fully_qualified,
                        error = %err,
                        "cannot synthesize type; site skipped"
                    );
                    resolution.skipped.push(SkippedSite {
                        slot: slot.id,
                        line: site.line(),
                        reason: SkipReason::Synthesis,
                    });
                    continue;
                }
            };

            resolution.candidates.push(RewriteCandidate {
                slot: slot.id,
                span: slot.span,
                symbol,
                replacement,
            });
        }

        resolution.next_node_id = ids.watermark();
        resolution
    }
}
