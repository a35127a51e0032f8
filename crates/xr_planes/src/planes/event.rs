//! Notifications delivered to the synchronizer

use serde::{Deserialize, Serialize};

use super::{DetectedPlane, PlaneId};

/// One notification from the plane detector or the session lifecycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaneEvent {
    /// A new physical plane was detected
    Added(DetectedPlane),
    /// A known plane's outline or placement was refined
    Updated(DetectedPlane),
    /// The detector stopped tracking a plane
    Removed(DetectedPlane),
    /// A new immersive session started; everything tracked before is stale
    SessionReset,
}

impl PlaneEvent {
    /// Plane this event refers to, if any
    pub fn plane_id(&self) -> Option<PlaneId> {
        match self {
            Self::Added(plane) | Self::Updated(plane) | Self::Removed(plane) => Some(plane.id),
            Self::SessionReset => None,
        }
    }
    
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Added(_) => "added",
            Self::Updated(_) => "updated",
            Self::Removed(_) => "removed",
            Self::SessionReset => "session-reset",
        }
    }
}
