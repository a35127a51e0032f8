//! Capability provider interface
//!
//! The narrow surface the plane pipeline needs from whatever stands up the
//! immersive session, camera and input rig.

use super::FeatureManager;
use crate::planes::PlaneEvent;

/// An XR runtime that can enable features and deliver plane notifications
pub trait XrSystem {
    /// Feature lookup table
    fn features(&self) -> &FeatureManager;
    
    /// Feature lookup table, for enabling features
    fn features_mut(&mut self) -> &mut FeatureManager;
    
    /// Whether an immersive session is running
    fn is_session_active(&self) -> bool;
    
    /// Drain the notifications delivered for this frame, in delivery order
    ///
    /// A session start is reported as [`PlaneEvent::SessionReset`] ahead of
    /// any plane notification of that session.
    fn poll_plane_events(&mut self) -> Vec<PlaneEvent>;
}
