//! Shared constants for flipcheck.

/// flipcheck version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---- Layout ----

/// Directory holding every summary table, the combined table and the results log.
pub const DEFAULT_CLASSIFICATION_DIR: &str = "classification_files";

/// R-values summary produced by the refinement step.
pub const DEFAULT_RVALUES_FILE: &str = "R_values_summary.txt";

/// Real-space correlation summary.
pub const DEFAULT_RSCC_FILE: &str = "RSCC_summary.txt";

/// EDIA density-fit summary.
pub const DEFAULT_EDIA_FILE: &str = "EDIA_summary.txt";

/// Clashscore summary (global, base pair and neighbour scopes).
pub const DEFAULT_CLASHSCORE_FILE: &str = "clashscore_summary.txt";

/// Mean B-factor summary.
pub const DEFAULT_BFACTOR_FILE: &str = "Bfactor_summary.txt";

/// Combined per-pair table.
pub const DEFAULT_COMBINED_FILE: &str = "combined_metrics.txt";

/// Append-only classification log.
pub const DEFAULT_RESULTS_FILE: &str = "classification_results.txt";

/// Roots probed, in order, for per-pair working directories.
pub const DEFAULT_PAIR_ROOTS: [&str; 2] = ["PDB_without_nt", "../PDB_without_nt"];

/// Directory rendered reports are written to.
pub const DEFAULT_REPORTS_DIR: &str = "reports";

/// Default report format.
pub const DEFAULT_REPORT_FORMAT: &str = "text";

/// Name of the occupancy record inside the pair's WC model directory.
pub const OCCUPANCY_FILE_NAME: &str = "occupancy";

/// Token written for missing values in whitespace tables.
pub const MISSING_TOKEN: &str = "None";

/// Token written for missing values in the results log and reports.
pub const NOT_AVAILABLE_TOKEN: &str = "NA";

// ---- Classification ----

/// RSCC tolerance: |delta| at or below this is Ambiguous.
pub const DEFAULT_RSCC_TOLERANCE: f64 = 0.007;

/// EDIA tolerance.
pub const DEFAULT_EDIA_TOLERANCE: f64 = 0.010;

/// Clashscore tolerance (exact zero difference only).
pub const DEFAULT_CLASH_TOLERANCE: f64 = 0.0;

/// R-work / R-free highlight threshold.
pub const DEFAULT_R_VALUE_TOLERANCE: f64 = 0.01;

/// Tolerance for any metric without a dedicated rule.
pub const DEFAULT_OTHER_TOLERANCE: f64 = 0.005;

/// Both EDIA values strictly below this force `Poor electron density`.
pub const DEFAULT_POOR_DENSITY_EDIA: f64 = 0.5;

/// Occupancy deviating from 1 by more than this yields `Occupancy_not_1`.
pub const DEFAULT_OCCUPANCY_TOLERANCE: f64 = 0.001;

/// Nucleotide codes treated as purines.
pub const PURINE_CODES: [&str; 2] = ["A", "G"];

// ---- Observability ----

/// Environment variable read by `init_tracing`.
pub const LOG_ENV_VAR: &str = "FLIPCHECK_LOG";

/// Filter used when `FLIPCHECK_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str =
    "flipcheck_core=info,flipcheck_storage=info,flipcheck_analysis=info,flipcheck_cli=info";
