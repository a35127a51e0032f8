//! Detected plane records as reported by the plane detector

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Mat4, Vec2};

/// Identifier the detector assigns to one physical plane for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaneId(pub u32);

impl fmt::Display for PlaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One detected flat surface
///
/// Read-only to the synchronizer. `outline` is the polygon boundary in the
/// plane's local 2-D frame and may contain missing entries while the detector
/// is still refining it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedPlane {
    /// Stable identifier, never reused within a session
    pub id: PlaneId,
    /// Ordered boundary points; `None` marks a point not yet available
    pub outline: Vec<Option<Vec2>>,
    /// Local-to-world transform of the plane frame
    pub placement: Mat4,
}

impl DetectedPlane {
    /// Create a plane record with a fully known outline
    pub fn new(id: PlaneId, outline: impl IntoIterator<Item = Vec2>, placement: Mat4) -> Self {
        Self {
            id,
            outline: outline.into_iter().map(Some).collect(),
            placement,
        }
    }
    
    /// Mark the outline point at `index` as missing
    pub fn with_missing_point(mut self, index: usize) -> Self {
        if let Some(point) = self.outline.get_mut(index) {
            *point = None;
        }
        self
    }
    
    /// Whether any outline entry is missing
    pub fn has_missing_points(&self) -> bool {
        self.outline.iter().any(Option::is_none)
    }
    
    /// The outline with every point present, or `None` if any is missing
    pub fn complete_outline(&self) -> Option<Vec<Vec2>> {
        self.outline.iter().copied().collect()
    }
}
