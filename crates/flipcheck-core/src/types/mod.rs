//! Domain vocabulary shared across crates.

pub mod geometry;
pub mod key;
pub mod metric;
pub mod occupancy;

pub use geometry::{Conformation, ConformationLabel, Geometry, Role};
pub use key::{CompositeKey, Nucleotide, KEY_COLUMNS};
pub use metric::{DeltaField, Metric};
pub use occupancy::OccupancyReading;
