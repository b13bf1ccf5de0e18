//! Top-level flipcheck configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::report_config::REPORT_FORMATS;
use super::{ClassifierConfig, CleanupConfig, PathsConfig, ReportConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the working root.
pub const PROJECT_CONFIG_FILE: &str = "flipcheck.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`FLIPCHECK_*`)
/// 3. Project config (`flipcheck.toml` in the working root)
/// 4. User config (`~/.flipcheck/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FlipcheckConfig {
    pub paths: PathsConfig,
    pub classifier: ClassifierConfig,
    pub report: ReportConfig,
    pub cleanup: CleanupConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub classification_dir: Option<String>,
    pub reports_dir: Option<String>,
    pub report_format: Option<String>,
    pub cleanup_enabled: Option<bool>,
}

impl FlipcheckConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &FlipcheckConfig) -> Result<(), ConfigError> {
        for (field, value) in config.classifier.tolerances() {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be a finite, non-negative number".to_string(),
                    });
                }
            }
        }
        if let Some(threshold) = config.classifier.poor_density_edia {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::ValidationFailed {
                    field: "classifier.poor_density_edia".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        if let Some(ref format) = config.report.format {
            if !REPORT_FORMATS.contains(&format.as_str()) {
                return Err(ConfigError::ValidationFailed {
                    field: "report.format".to_string(),
                    message: format!("must be one of {}", REPORT_FORMATS.join(", ")),
                });
            }
        }
        let dirs = [
            ("paths.classification_dir", &config.paths.classification_dir),
            ("paths.reports_dir", &config.paths.reports_dir),
        ];
        for (field, value) in dirs {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        if config.paths.pair_roots.iter().any(|r| r.trim().is_empty()) {
            return Err(ConfigError::ValidationFailed {
                field: "paths.pair_roots".to_string(),
                message: "entries must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.flipcheck/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".flipcheck").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut FlipcheckConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: FlipcheckConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut FlipcheckConfig, other: &FlipcheckConfig) {
        // Paths
        let (bp, op) = (&mut base.paths, &other.paths);
        merge_opt(&mut bp.classification_dir, &op.classification_dir);
        merge_opt(&mut bp.rvalues_file, &op.rvalues_file);
        merge_opt(&mut bp.rscc_file, &op.rscc_file);
        merge_opt(&mut bp.edia_file, &op.edia_file);
        merge_opt(&mut bp.clashscore_file, &op.clashscore_file);
        merge_opt(&mut bp.bfactor_file, &op.bfactor_file);
        merge_opt(&mut bp.combined_file, &op.combined_file);
        merge_opt(&mut bp.results_file, &op.results_file);
        merge_opt(&mut bp.reports_dir, &op.reports_dir);
        if !op.pair_roots.is_empty() {
            bp.pair_roots = op.pair_roots.clone();
        }

        // Classifier
        let (bc, oc) = (&mut base.classifier, &other.classifier);
        merge_opt(&mut bc.rscc_tolerance, &oc.rscc_tolerance);
        merge_opt(&mut bc.edia_tolerance, &oc.edia_tolerance);
        merge_opt(&mut bc.clash_tolerance, &oc.clash_tolerance);
        merge_opt(&mut bc.r_value_tolerance, &oc.r_value_tolerance);
        merge_opt(&mut bc.other_tolerance, &oc.other_tolerance);
        merge_opt(&mut bc.poor_density_edia, &oc.poor_density_edia);
        merge_opt(&mut bc.occupancy_tolerance, &oc.occupancy_tolerance);
        merge_opt(
            &mut bc.allow_unknown_conformation,
            &oc.allow_unknown_conformation,
        );

        // Report
        merge_opt(&mut base.report.enabled, &other.report.enabled);
        merge_opt(&mut base.report.format, &other.report.format);

        // Cleanup
        merge_opt(&mut base.cleanup.enabled, &other.cleanup.enabled);
    }

    /// Apply environment variable overrides.
    /// Pattern: `FLIPCHECK_CLASSIFICATION_DIR`, `FLIPCHECK_RSCC_TOLERANCE`, etc.
    fn apply_env_overrides(config: &mut FlipcheckConfig) {
        if let Ok(val) = std::env::var("FLIPCHECK_CLASSIFICATION_DIR") {
            config.paths.classification_dir = Some(val);
        }
        if let Ok(val) = std::env::var("FLIPCHECK_REPORTS_DIR") {
            config.paths.reports_dir = Some(val);
        }
        if let Ok(val) = std::env::var("FLIPCHECK_PAIR_ROOTS") {
            let roots: Vec<String> = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            if !roots.is_empty() {
                config.paths.pair_roots = roots;
            }
        }
        if let Ok(val) = std::env::var("FLIPCHECK_REPORT_FORMAT") {
            config.report.format = Some(val);
        }
        if let Ok(val) = std::env::var("FLIPCHECK_CLEANUP_ENABLED") {
            if let Ok(v) = val.parse::<bool>() {
                config.cleanup.enabled = Some(v);
            }
        }
        if let Ok(val) = std::env::var("FLIPCHECK_RSCC_TOLERANCE") {
            if let Ok(v) = val.parse::<f64>() {
                config.classifier.rscc_tolerance = Some(v);
            }
        }
        if let Ok(val) = std::env::var("FLIPCHECK_EDIA_TOLERANCE") {
            if let Ok(v) = val.parse::<f64>() {
                config.classifier.edia_tolerance = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut FlipcheckConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.classification_dir {
            config.paths.classification_dir = Some(v.clone());
        }
        if let Some(ref v) = cli.reports_dir {
            config.paths.reports_dir = Some(v.clone());
        }
        if let Some(ref v) = cli.report_format {
            config.report.format = Some(v.clone());
        }
        if let Some(v) = cli.cleanup_enabled {
            config.cleanup.enabled = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn merge_opt<T: Clone>(base: &mut Option<T>, other: &Option<T>) {
    if other.is_some() {
        *base = other.clone();
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
