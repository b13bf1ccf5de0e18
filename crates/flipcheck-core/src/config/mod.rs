//! Configuration system for flipcheck.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod classifier_config;
pub mod cleanup_config;
pub mod flipcheck_config;
pub mod paths_config;
pub mod report_config;

pub use classifier_config::ClassifierConfig;
pub use cleanup_config::CleanupConfig;
pub use flipcheck_config::{CliOverrides, FlipcheckConfig};
pub use paths_config::PathsConfig;
pub use report_config::{ReportConfig, REPORT_FORMATS};
