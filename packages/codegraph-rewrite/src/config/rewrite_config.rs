//! Rewrite configuration
//!
//! Preset-based defaults, builder overrides and validation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    error::{ConfigError, ConfigResult},
    io::{ConfigExportV1, ConfigOverrides},
    preset::Preset,
    provenance::{ConfigProvenance, ConfigSource},
};
use crate::features::semantic::{ProjectContext, DEFAULT_MAX_FILE_BYTES};
use crate::features::simplification::SimplifyOptions;

/// 256 MiB
pub const MAX_FILE_BYTES_LIMIT: u64 = 256 * 1024 * 1024;

const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Rewrite configuration builder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteConfig {
    preset: Preset,
    simplify: bool,
    add_imports: bool,
    dry_run: bool,
    project_root: Option<PathBuf>,
    allow_syntax_errors: bool,
    max_file_bytes: u64,
    #[serde(skip)]
    provenance: Option<ConfigProvenance>,
}

impl RewriteConfig {
    /// Start from preset defaults
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            simplify: preset.simplify(),
            add_imports: preset.add_imports(),
            dry_run: false,
            project_root: None,
            allow_syntax_errors: false,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            provenance: Some(ConfigProvenance::from_preset(preset)),
        }
    }

    /// Switch to another preset's defaults, keeping other fields
    pub fn apply_preset(mut self, preset: Preset) -> Self {
        self.preset = preset;
        self.simplify = preset.simplify();
        self.add_imports = preset.add_imports();
        self.track("simplify", ConfigSource::Preset(preset));
        self.track("add_imports", ConfigSource::Preset(preset));
        self
    }

    fn track(&mut self, field: &str, source: ConfigSource) {
        self.provenance
            .get_or_insert_with(|| ConfigProvenance::from_preset(self.preset))
            .track_field(field, source);
    }

    pub fn simplify(mut self, enabled: bool) -> Self {
        self.simplify = enabled;
        self.track("simplify", ConfigSource::Builder);
        self
    }

    pub fn add_imports(mut self, enabled: bool) -> Self {
        self.add_imports = enabled;
        self.track("add_imports", ConfigSource::Builder);
        self
    }

    /// Run the whole pipeline but do not write the result
    pub fn dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self.track("dry_run", ConfigSource::Builder);
        self
    }

    pub fn project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = Some(root.into());
        self.track("project_root", ConfigSource::Builder);
        self
    }

    pub fn allow_syntax_errors(mut self, enabled: bool) -> Self {
        self.allow_syntax_errors = enabled;
        self.track("allow_syntax_errors", ConfigSource::Builder);
        self
    }

    pub fn max_file_bytes(mut self, limit: u64) -> Self {
        self.max_file_bytes = limit;
        self.track("max_file_bytes", ConfigSource::Builder);
        self
    }

    /// Apply YAML overrides on top of the current values
    pub fn with_overrides(mut self, overrides: ConfigOverrides, source: ConfigSource) -> Self {
        if let Some(v) = overrides.simplify {
            self.simplify = v;
            self.track("simplify", source.clone());
        }
        if let Some(v) = overrides.add_imports {
            self.add_imports = v;
            self.track("add_imports", source.clone());
        }
        if let Some(v) = overrides.dry_run {
            self.dry_run = v;
            self.track("dry_run", source.clone());
        }
        if let Some(v) = overrides.project_root {
            self.project_root = Some(v);
            self.track("project_root", source.clone());
        }
        if let Some(v) = overrides.allow_syntax_errors {
            self.allow_syntax_errors = v;
            self.track("allow_syntax_errors", source.clone());
        }
        if let Some(v) = overrides.max_file_bytes {
            self.max_file_bytes = v;
            self.track("max_file_bytes", source);
        }
        self
    }

    /// Validate and freeze
    pub fn build(self) -> ConfigResult<ValidatedConfig> {
        if self.max_file_bytes == 0 || self.max_file_bytes > MAX_FILE_BYTES_LIMIT {
            return Err(ConfigError::range_with_hint(
                "max_file_bytes",
                self.max_file_bytes,
                1,
                MAX_FILE_BYTES_LIMIT,
                "Larger files are refused before parsing",
            ));
        }
        if self.add_imports && !self.simplify {
            return Err(ConfigError::Conflict {
                issue: "add_imports is on but simplify is off".to_string(),
                fix: "Enable simplify or set add_imports=false".to_string(),
            });
        }
        if let Some(root) = &self.project_root {
            if !root.is_dir() {
                return Err(ConfigError::Conflict {
                    issue: format!("project_root {} is not a directory", root.display()),
                    fix: "Point project_root at an existing directory".to_string(),
                });
            }
        }
        Ok(ValidatedConfig(self))
    }

    /// Load a YAML v1 file and validate it
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<ValidatedConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let export: ConfigExportV1 = serde_yaml::from_str(&content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset = Preset::from_str(&export.preset)?;
        let source = ConfigSource::Yaml {
            path: path.display().to_string(),
        };
        Self::preset(preset)
            .with_overrides(export.overrides.unwrap_or_default(), source)
            .build()
    }
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

/// Configuration that passed validation
#[derive(Debug, Clone)]
pub struct ValidatedConfig(RewriteConfig);

impl ValidatedConfig {
    pub fn into_inner(self) -> RewriteConfig {
        self.0
    }

    pub fn preset(&self) -> Preset {
        self.0.preset
    }

    pub fn dry_run(&self) -> bool {
        self.0.dry_run
    }

    pub fn simplify_options(&self) -> SimplifyOptions {
        SimplifyOptions {
            enabled: self.0.simplify,
            add_imports: self.0.add_imports,
        }
    }

    pub fn project_context(&self) -> ProjectContext {
        ProjectContext {
            root: self.0.project_root.clone(),
            allow_syntax_errors: self.0.allow_syntax_errors,
            max_file_bytes: self.0.max_file_bytes,
        }
    }

    pub fn provenance(&self) -> ConfigProvenance {
        self.0
            .provenance
            .clone()
            .unwrap_or_else(|| ConfigProvenance::from_preset(self.0.preset))
    }

    /// Export as YAML v1; only values that differ from the preset are written
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let base = RewriteConfig::preset(self.0.preset);
        let differs = |a: bool, b: bool| (a != b).then_some(a);
        let overrides = ConfigOverrides {
            simplify: differs(self.0.simplify, base.simplify),
            add_imports: differs(self.0.add_imports, base.add_imports),
            dry_run: differs(self.0.dry_run, base.dry_run),
            project_root: self.0.project_root.clone(),
            allow_syntax_errors: differs(self.0.allow_syntax_errors, base.allow_syntax_errors),
            max_file_bytes: (self.0.max_file_bytes != base.max_file_bytes).then_some(self.0.max_file_bytes),
        };
        let export = ConfigExportV1 {
            version: Some(1),
            preset: self.0.preset.as_str().to_string(),
            overrides: (overrides != ConfigOverrides::default()).then_some(overrides),
        };
        Ok(serde_yaml::to_string(&export)?)
    }

    /// One-line description for logs
    pub fn describe(&self) -> String {
        let options = self.simplify_options();
        format!(
            "preset={} simplify={} add_imports={} dry_run={}",
            self.0.preset, options.enabled, options.add_imports, self.0.dry_run
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_defaults_flow_into_options() {
        let config = RewriteConfig::preset(Preset::Minimal).build().unwrap();
        assert!(!config.simplify_options().enabled);
        assert!(!config.dry_run());
        assert_eq!(config.project_context(), ProjectContext::default());
    }

    #[test]
    fn test_builder_overrides_are_tracked() {
        let config = RewriteConfig::preset(Preset::Balanced)
            .add_imports(false)
            .build()
            .unwrap();
        assert!(!config.simplify_options().add_imports);
        assert_eq!(config.provenance().source_of("add_imports"), ConfigSource::Builder);
        assert_eq!(
            config.provenance().source_of("simplify"),
            ConfigSource::Preset(Preset::Balanced)
        );
    }

    #[test]
    fn test_range_validation() {
        let err = RewriteConfig::default().max_file_bytes(0).build().unwrap_err();
        assert!(matches!(err, ConfigError::Range { .. }));
    }

    #[test]
    fn test_imports_need_simplification() {
        let err = RewriteConfig::preset(Preset::Minimal)
            .add_imports(true)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Conflict { .. }));
    }

    #[test]
    fn test_project_root_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        assert!(RewriteConfig::default().project_root(dir.path()).build().is_ok());
        let missing = dir.path().join("nope");
        assert!(RewriteConfig::default().project_root(missing).build().is_err());
    }
}
