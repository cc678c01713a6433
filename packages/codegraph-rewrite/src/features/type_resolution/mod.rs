//! Type Resolution Feature
//!
//! Decides which implicit declarations can take an explicit type and
//! synthesizes the fully-qualified replacement for each.
//!
//! ## Structure
//! - `domain/` - RewriteCandidate, SkippedSite, ExclusionPolicy
//! - `application/` - TypeResolver

pub mod application;
pub mod domain;

pub use application::TypeResolver;
pub use domain::{ExclusionPolicy, Resolution, RewriteCandidate, SkipReason, SkippedSite};
