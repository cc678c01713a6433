//! Rewrite Feature
//!
//! Applies a rewrite plan to a compilation unit in one structural pass.
//!
//! ## Structure
//! - `domain/` - RewritePlan
//! - `application/` - TreeRewriter

pub mod application;
pub mod domain;

pub use application::TreeRewriter;
pub use domain::RewritePlan;
