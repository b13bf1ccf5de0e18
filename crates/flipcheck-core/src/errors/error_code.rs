//! FlipcheckErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to provide a structured error code
/// string that scripts driving the CLI can match on.
pub trait FlipcheckErrorCode {
    /// Returns the error code string (e.g., "TABLE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const TABLE_ERROR: &str = "TABLE_ERROR";
pub const TABLE_IO: &str = "TABLE_IO";
pub const NO_SOURCES: &str = "NO_SOURCES";
pub const LOCK_FAILED: &str = "LOCK_FAILED";
pub const AMBIGUOUS_PURINE: &str = "AMBIGUOUS_PURINE";
pub const UNKNOWN_CONFORMATION: &str = "UNKNOWN_CONFORMATION";
pub const KEY_NOT_FOUND: &str = "KEY_NOT_FOUND";
pub const COMBINED_MISSING: &str = "COMBINED_MISSING";
pub const REPORT_ERROR: &str = "REPORT_ERROR";
