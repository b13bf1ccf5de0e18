//! Source of the occupancy reading consulted on total failure.

use std::path::{Path, PathBuf};

use flipcheck_core::types::OccupancyReading;
use flipcheck_storage::occupancy::read_occupancy;

/// Supplies the occupancy of a pair's reference model. Only read when every
/// quality metric is missing.
pub trait OccupancyProbe {
    fn read(&self) -> OccupancyReading;
}

/// Reads `<pair dir>/WC/occupancy`.
#[derive(Debug, Clone)]
pub struct FileOccupancy {
    path: PathBuf,
}

impl FileOccupancy {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OccupancyProbe for FileOccupancy {
    fn read(&self) -> OccupancyReading {
        read_occupancy(&self.path)
    }
}

/// A fixed reading.
impl OccupancyProbe for OccupancyReading {
    fn read(&self) -> OccupancyReading {
        self.clone()
    }
}
