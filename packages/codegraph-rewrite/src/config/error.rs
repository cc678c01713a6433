//! Configuration error types

use thiserror::Error;

use crate::shared::models::RewriteError;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Range validation error
    #[error("Invalid range for field '{field}': {value} not in {min}..={max}. {hint}")]
    Range {
        field: String,
        value: String,
        min: String,
        max: String,
        hint: String,
    },

    /// Missing version field in YAML
    #[error("Missing 'version' field in configuration file. Add 'version: 1' to the top of your YAML file.")]
    MissingVersion,

    /// Unsupported version
    #[error("Unsupported configuration version {found}. Supported versions: {}", supported.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    /// Unknown preset name
    #[error("Unknown preset '{name}'. {suggestion} Valid presets: minimal, conservative, balanced")]
    UnknownPreset { name: String, suggestion: String },

    /// Two settings contradict each other
    #[error("Configuration conflict: {issue}. Fix: {fix}")]
    Conflict { issue: String, fix: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Create a range error with a hint
    pub fn range_with_hint(
        field: impl Into<String>,
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
        hint: impl Into<String>,
    ) -> Self {
        Self::Range {
            field: field.into(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
            hint: hint.into(),
        }
    }

    /// Create an unknown preset error with the closest valid name
    pub fn unknown_preset(name: impl Into<String>, valid: &[&str]) -> Self {
        let name = name.into();
        let suggestion = find_closest_match(&name, valid);
        Self::UnknownPreset { name, suggestion }
    }
}

impl From<ConfigError> for RewriteError {
    fn from(err: ConfigError) -> Self {
        RewriteError::config(err.to_string()).with_source(err)
    }
}

/// Find closest match using simple edit distance
fn find_closest_match(target: &str, candidates: &[&str]) -> String {
    match candidates
        .iter()
        .min_by_key(|candidate| levenshtein_distance(&target.to_lowercase(), candidate))
    {
        Some(closest) => format!("Did you mean '{}'?", closest),
        None => "No valid values available.".to_string(),
    }
}

/// Simple Levenshtein distance implementation
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1: Vec<char> = s1.chars().collect();
    let s2: Vec<char> = s2.chars().collect();
    let mut previous: Vec<usize> = (0..=s2.len()).collect();

    for (i, c1) in s1.iter().enumerate() {
        let mut current = vec![i + 1; s2.len() + 1];
        for (j, c2) in s2.iter().enumerate() {
            let cost = usize::from(c1 != c2);
            current[j + 1] = (previous[j + 1] + 1) // deletion
                .min(current[j] + 1) // insertion
                .min(previous[j] + cost); // substitution
        }
        previous = current;
    }

    previous[s2.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::ErrorKind;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("balanced", "balanced"), 0);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
    }

    #[test]
    fn test_unknown_preset_suggests_closest() {
        let err = ConfigError::unknown_preset("balansed", &["minimal", "conservative", "balanced"]);
        let msg = err.to_string();
        assert!(msg.contains("balansed"));
        assert!(msg.contains("Did you mean 'balanced'?"));
    }

    #[test]
    fn test_error_formatting() {
        let err = ConfigError::range_with_hint("max_file_bytes", 0, 1, 1024, "Files need at least one byte");
        let msg = err.to_string();
        assert!(msg.contains("max_file_bytes"));
        assert!(msg.contains("1..=1024"));
        assert!(msg.contains("at least one byte"));
    }

    #[test]
    fn test_unsupported_version_error() {
        let err = ConfigError::UnsupportedVersion {
            found: 2,
            supported: vec![1],
        };
        let msg = err.to_string();
        assert!(msg.contains("version 2"));
        assert!(msg.contains("Supported versions: 1"));
    }

    #[test]
    fn test_maps_to_config_kind() {
        let err: RewriteError = ConfigError::MissingVersion.into();
        assert_eq!(err.kind, ErrorKind::Config);
    }
}
