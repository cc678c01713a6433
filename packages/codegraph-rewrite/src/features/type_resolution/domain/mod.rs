mod candidate;
mod exclusion_policy;

pub use candidate::{Resolution, RewriteCandidate, SkipReason, SkippedSite};
pub use exclusion_policy::ExclusionPolicy;
