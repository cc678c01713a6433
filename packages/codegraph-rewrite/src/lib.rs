/*
 * Codegraph Rewrite - implicit-type → explicit-type rewriter
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (RewriteError, Span, ScopeStack)
 * - features/    : Vertical slices (syntax → semantic → declaration_scan →
 *                  type_resolution → rewrite → simplification → persistence)
 * - pipeline/    : Session driver and state machine
 * - config/      : Presets, builder and YAML schema (RFC-001 shape)
 *
 * Every stage returns a new immutable CompilationUnit; the input tree is
 * never mutated.
 */

// Crate-level lint configuration
#![allow(clippy::should_implement_trait)] // from_str naming intentional
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules (pipeline stages)
pub mod features;

/// Session orchestration
pub mod pipeline;

/// Configuration system (RFC-001)
pub mod config;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{Preset, RewriteConfig, ValidatedConfig};
pub use features::persistence::{DocumentSink, FileSystemSink};
pub use features::semantic::{JavaProvider, ProjectContext, SemanticModel, SemanticProvider};
pub use pipeline::{Outcome, SessionDriver, SessionResult, SessionState};
pub use shared::models::{ErrorKind, Result, RewriteError};
