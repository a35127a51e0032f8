//! Simulated XR runtime
//!
//! Replays queued detector frames, so the plane pipeline can run and be
//! tested without a headset.

use std::collections::VecDeque;

use super::{FeatureManager, FeatureName, XrSystem};
use crate::planes::PlaneEvent;

/// XR runtime backed by a queue of scripted frames
#[derive(Debug, Default)]
pub struct SimulatedXrSystem {
    features: FeatureManager,
    session_active: bool,
    reset_pending: bool,
    frames: VecDeque<Vec<PlaneEvent>>,
}

impl SimulatedXrSystem {
    /// Create a runtime offering `features`
    pub fn new(features: FeatureManager) -> Self {
        Self {
            features,
            session_active: false,
            reset_pending: false,
            frames: VecDeque::new(),
        }
    }
    
    /// Start an immersive session
    ///
    /// The session-reset notification is delivered by the next poll, ahead
    /// of that frame's events.
    pub fn start_session(&mut self) {
        log::info!("Simulated XR session started");
        self.session_active = true;
        self.reset_pending = true;
    }
    
    /// End the session, dropping every undelivered frame
    pub fn end_session(&mut self) {
        log::info!("Simulated XR session ended ({} frames undelivered)", self.frames.len());
        self.session_active = false;
        self.reset_pending = false;
        self.frames.clear();
    }
    
    /// Queue the detector notifications of one frame
    pub fn queue_frame(&mut self, events: Vec<PlaneEvent>) {
        self.frames.push_back(events);
    }
    
    /// Frames not yet delivered
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }
}

impl XrSystem for SimulatedXrSystem {
    fn features(&self) -> &FeatureManager {
        &self.features
    }
    
    fn features_mut(&mut self) -> &mut FeatureManager {
        &mut self.features
    }
    
    fn is_session_active(&self) -> bool {
        self.session_active
    }
    
    fn poll_plane_events(&mut self) -> Vec<PlaneEvent> {
        if !self.session_active {
            return Vec::new();
        }
        
        let mut events = Vec::new();
        if std::mem::take(&mut self.reset_pending) {
            events.push(PlaneEvent::SessionReset);
        }
        
        // The detector only reports while plane detection is on
        if let Some(frame) = self.frames.pop_front() {
            if self.features.is_enabled(FeatureName::PlaneDetection) {
                events.extend(frame);
            }
        }
        events
    }
}
