//! Error handling for flipcheck.
//! One error enum per subsystem, `thiserror` only, zero `anyhow` in libraries.

pub mod classify_error;
pub mod config_error;
pub mod error_code;
pub mod pipeline_error;
pub mod report_error;
pub mod resolve_error;
pub mod table_error;

pub use classify_error::ClassifyError;
pub use config_error::ConfigError;
pub use error_code::FlipcheckErrorCode;
pub use pipeline_error::PipelineError;
pub use report_error::ReportError;
pub use resolve_error::ResolveError;
pub use table_error::TableError;
