//! Per-event faults of the plane pipeline
//!
//! None of these are fatal. The synchronizer absorbs them, logs, and keeps
//! whatever was displayed before.

use thiserror::Error;

use super::PlaneId;

/// Plane synchronization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaneError {
    /// Outline has too few usable points to enclose any area
    #[error("Degenerate polygon: {distinct_points} distinct outline points")]
    DegeneratePolygon {
        /// Distinct points left after closing the loop
        distinct_points: usize,
    },
    
    /// Outline or placement carries a NaN or infinite value
    #[error("Non-finite {0} from the detector")]
    NonFinite(&'static str),
    
    /// Update for a plane that is not tracked
    #[error("Update for untracked plane {0}")]
    UnknownIdOnUpdate(PlaneId),
    
    /// Removal of a plane that is not tracked
    #[error("Removal of untracked plane {0}")]
    UnknownIdOnRemove(PlaneId),
}
