//! Reader for the per-pair occupancy record.

use std::path::Path;

use flipcheck_core::types::OccupancyReading;
use tracing::warn;

/// Read the whole file, trimmed, as one number.
pub fn read_occupancy(path: &Path) -> OccupancyReading {
    match std::fs::read_to_string(path) {
        Ok(text) => match text.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => OccupancyReading::Value(v),
            _ => {
                warn!(path = %path.display(), "occupancy record is not a number");
                OccupancyReading::Unreadable(format!("not a number: {:?}", text.trim()))
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => OccupancyReading::Absent,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read occupancy record");
            OccupancyReading::Unreadable(e.to_string())
        }
    }
}
