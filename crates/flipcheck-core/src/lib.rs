//! # flipcheck-core
//!
//! Foundation crate for flipcheck.
//! Defines the pair identity, geometry and metric vocabulary, errors, config,
//! tracing setup and constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::FlipcheckConfig;
pub use types::{CompositeKey, Conformation, Geometry, Metric, OccupancyReading, Role};
