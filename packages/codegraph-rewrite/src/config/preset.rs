//! Preset configurations
//!
//! Presets provide complete default configurations for common use cases.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Rewrite only: explicit types stay fully qualified
    Minimal,

    /// Simplify names but never touch the import list
    Conservative,

    /// Simplify names and add imports where needed
    Balanced,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Minimal, Preset::Conservative, Preset::Balanced];

    /// Parse preset from string
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "minimal" => Ok(Self::Minimal),
            "conservative" => Ok(Self::Conservative),
            "balanced" => Ok(Self::Balanced),
            _ => Err(ConfigError::unknown_preset(s, &Self::ALL.map(|p| p.as_str()))),
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Conservative => "conservative",
            Self::Balanced => "balanced",
        }
    }

    pub fn simplify(&self) -> bool {
        !matches!(self, Self::Minimal)
    }

    pub fn add_imports(&self) -> bool {
        matches!(self, Self::Balanced)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Balanced
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
