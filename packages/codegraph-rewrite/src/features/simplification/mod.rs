//! Simplification Feature
//!
//! Shortens the fully-qualified names the rewriter synthesized and adds the
//! import directives that make the short forms valid.
//!
//! ## Structure
//! - `domain/` - SimplifyOptions, SimplifiedUnit, import directive insertion
//! - `application/` - NameSimplifier (runs on a blocking task)

pub mod application;
pub mod domain;

pub use application::{strip_annotations, NameSimplifier};
pub use domain::{SimplifiedUnit, SimplifyOptions};
