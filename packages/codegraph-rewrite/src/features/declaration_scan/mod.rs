//! Declaration Scan Feature
//!
//! Finds implicitly-typed declaration sites (`var x = ...`) in a unit.
//!
//! ## Structure
//! - `domain/` - ImplicitDeclaration
//! - `application/` - DeclarationScanner

pub mod application;
pub mod domain;

pub use application::{scan, DeclarationScanner};
pub use domain::ImplicitDeclaration;
