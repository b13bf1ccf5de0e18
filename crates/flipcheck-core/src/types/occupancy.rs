//! Result of probing the occupancy record of a pair.

/// What the occupancy collaborator reported for a pair.
#[derive(Debug, Clone, PartialEq)]
pub enum OccupancyReading {
    /// A numeric mean occupancy.
    Value(f64),
    /// No record exists.
    Absent,
    /// A record exists but could not be read or parsed.
    Unreadable(String),
}
