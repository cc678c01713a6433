//! Rewrite Configuration
//!
//! Two tiers of configuration:
//! - Level 1: Preset - Simple one-liner
//! - Level 2: Builder / YAML overrides - Field-level adjustment
//!
//! # Examples
//!
//! ```rust,ignore
//! use codegraph_rewrite::config::{RewriteConfig, Preset};
//!
//! // Level 1: Simple preset
//! let config = RewriteConfig::preset(Preset::Balanced).build()?;
//!
//! // Level 2: Override specific fields
//! let config = RewriteConfig::preset(Preset::Conservative)
//!     .dry_run(true)
//!     .build()?;
//!
//! // Or from a versioned YAML file
//! let config = RewriteConfig::from_yaml("explicit-types.yaml")?;
//! ```

pub mod error;
pub mod io;
pub mod preset;
pub mod provenance;
pub mod rewrite_config;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigExportV1, ConfigOverrides};
pub use preset::Preset;
pub use provenance::{ConfigProvenance, ConfigSource};
pub use rewrite_config::{RewriteConfig, ValidatedConfig, MAX_FILE_BYTES_LIMIT};
