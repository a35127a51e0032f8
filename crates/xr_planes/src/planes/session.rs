//! Plane tracking session
//!
//! Stands between an [`XrSystem`] and the [`PlaneSynchronizer`]: turns on
//! plane detection once, then forwards each frame's notifications. If the
//! runtime cannot detect planes the session stays disabled for good rather
//! than retrying every frame.

use crate::config::PlaneSyncConfig;
use crate::physics::Ray;
use crate::scene::Scene;
use crate::xr::{FeatureName, XrSystem};

use super::{pick_plane, PlaneHit, PlaneSynchronizer, SyncOutcome};

/// What one frame's update did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Frame number, starting at 1
    pub frame: u64,
    /// One outcome per delivered notification, in delivery order
    pub outcomes: Vec<SyncOutcome>,
}

impl FrameReport {
    /// Whether nothing was delivered this frame
    pub fn is_idle(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Drives plane synchronization from an XR runtime
pub struct PlaneTrackingSession<S: XrSystem> {
    system: S,
    synchronizer: PlaneSynchronizer,
    planes_enabled: bool,
    picking_enabled: bool,
    frame: u64,
}

impl<S: XrSystem> PlaneTrackingSession<S> {
    /// Enable the needed features on `system` and set up synchronization
    pub fn new(mut system: S, config: &PlaneSyncConfig) -> Self {
        let planes_enabled = match system.features_mut().enable(FeatureName::PlaneDetection) {
            Ok(_) => true,
            Err(err) => {
                log::warn!("Plane synchronization disabled: {}", err);
                false
            }
        };

        let picking_enabled = planes_enabled
            && config.enable_hit_test
            && match system.features_mut().enable(FeatureName::HitTest) {
                Ok(_) => true,
                Err(err) => {
                    log::warn!("Plane picking disabled: {}", err);
                    false
                }
            };

        Self {
            system,
            synchronizer: PlaneSynchronizer::from_config(config),
            planes_enabled,
            picking_enabled,
            frame: 0,
        }
    }

    /// Process this frame's notifications
    pub fn update(&mut self, scene: &mut Scene) -> FrameReport {
        self.frame += 1;
        if !self.planes_enabled {
            return FrameReport { frame: self.frame, outcomes: Vec::new() };
        }

        let events = self.system.poll_plane_events();
        if !events.is_empty() {
            log::trace!("Frame {}: {} plane notifications", self.frame, events.len());
        }

        FrameReport {
            frame: self.frame,
            outcomes: self.synchronizer.handle_all(&events, scene),
        }
    }

    /// Nearest tracked plane along `ray`, if picking is enabled
    pub fn pick(&self, ray: &Ray, scene: &Scene) -> Option<PlaneHit> {
        if !self.picking_enabled {
            return None;
        }
        pick_plane(ray, self.synchronizer.registry(), scene)
    }

    /// Whether plane synchronization is running
    pub fn is_enabled(&self) -> bool {
        self.planes_enabled
    }

    /// Whether ray picking against planes is available
    pub fn is_picking_enabled(&self) -> bool {
        self.picking_enabled
    }

    /// The synchronizer being driven
    pub fn synchronizer(&self) -> &PlaneSynchronizer {
        &self.synchronizer
    }

    /// The XR runtime
    pub fn system(&self) -> &S {
        &self.system
    }

    /// The XR runtime, e.g. to start or end its session
    pub fn system_mut(&mut self) -> &mut S {
        &mut self.system
    }
}
