//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure business logic (no external dependencies)
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - External dependency implementations

pub mod syntax;

// Java syntax + semantic front-end behind the provider port
pub mod semantic;

pub mod declaration_scan;
pub mod type_resolution;
pub mod rewrite;
pub mod simplification;

// Document store
pub mod persistence;
