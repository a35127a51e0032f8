//! Synchronization controller
//!
//! Mirrors the detector's plane set into the scene. Every notification goes
//! through [`PlaneSynchronizer::handle`], which drives the registry and the
//! polygon builder. Per-plane state is implicit in the registry: an id is
//! *tracked* while it has a mesh installed and *untracked* otherwise. An id
//! whose `Added` could not be meshed is *pending*: the first usable update
//! installs it as if it were the add.
//!
//! Faults never escape: a malformed frame is logged and skipped, and whatever
//! was on screen for that plane stays there.

use std::collections::HashSet;

use crate::config::PlaneSyncConfig;
use crate::scene::Scene;

use super::{
    DetectedPlane, MaterialPolicy, PlaneError, PlaneEvent, PlaneId, PlaneRegistry, PolygonBuilder,
};

/// What handling one event did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A new mesh was installed for a plane, on its add or on the first
    /// usable update after an unusable add
    Installed,
    /// A tracked plane's mesh was rebuilt with its existing material
    Rebuilt,
    /// The update carried missing outline points; the old mesh stays
    SkippedStale,
    /// The event could not be meshed; prior state is unchanged
    Dropped(PlaneError),
    /// The event referred to an untracked plane and was ignored
    Ignored(PlaneError),
    /// A plane's mesh was released, or a pending plane was forgotten
    Removed,
    /// The session was reset
    Reset {
        /// Meshes released by the reset
        released: usize,
    },
}

/// Running counters per outcome kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Meshes installed for new planes
    pub installed: usize,
    /// Meshes rebuilt on update
    pub rebuilt: usize,
    /// Updates skipped because the outline was incomplete
    pub skipped_stale: usize,
    /// Events dropped because the outline was degenerate
    pub dropped: usize,
    /// Events about untracked planes
    pub ignored: usize,
    /// Meshes removed on request
    pub removed: usize,
    /// Session resets handled
    pub resets: usize,
}

impl SyncStats {
    fn record(&mut self, outcome: &SyncOutcome) {
        match outcome {
            SyncOutcome::Installed => self.installed += 1,
            SyncOutcome::Rebuilt => self.rebuilt += 1,
            SyncOutcome::SkippedStale => self.skipped_stale += 1,
            SyncOutcome::Dropped(_) => self.dropped += 1,
            SyncOutcome::Ignored(_) => self.ignored += 1,
            SyncOutcome::Removed => self.removed += 1,
            SyncOutcome::Reset { .. } => self.resets += 1,
        }
    }
}

/// Keeps one mesh per detected plane in the scene
#[derive(Debug)]
pub struct PlaneSynchronizer {
    builder: PolygonBuilder,
    registry: PlaneRegistry,
    /// Added, but not yet meshed
    pending: HashSet<PlaneId>,
    policy: MaterialPolicy,
    stats: SyncStats,
}

impl PlaneSynchronizer {
    /// Create a synchronizer from its parts
    pub fn new(builder: PolygonBuilder, policy: MaterialPolicy) -> Self {
        Self {
            builder,
            registry: PlaneRegistry::new(),
            pending: HashSet::new(),
            policy,
            stats: SyncStats::default(),
        }
    }

    /// Create a synchronizer from configuration
    pub fn from_config(config: &PlaneSyncConfig) -> Self {
        Self::new(
            PolygonBuilder::new(config.min_outline_points),
            MaterialPolicy::new(config.plane_alpha, config.material_seed),
        )
    }

    /// Apply one notification to the scene
    pub fn handle(&mut self, event: &PlaneEvent, scene: &mut Scene) -> SyncOutcome {
        let outcome = match event {
            PlaneEvent::Added(plane) => self.on_added(plane, scene),
            PlaneEvent::Updated(plane) => self.on_updated(plane, scene),
            PlaneEvent::Removed(plane) => self.on_removed(plane, scene),
            PlaneEvent::SessionReset => self.on_session_reset(scene),
        };

        match &outcome {
            SyncOutcome::Dropped(err) => {
                log::warn!("Plane {:?}: dropped {} event: {}", event.plane_id(), event.kind(), err);
            }
            SyncOutcome::Ignored(err) => {
                log::debug!("Ignored {} event: {}", event.kind(), err);
            }
            other => {
                log::debug!("Plane {:?}: {} -> {:?}", event.plane_id(), event.kind(), other);
            }
        }

        self.stats.record(&outcome);
        outcome
    }

    /// Apply a batch of notifications in delivery order
    pub fn handle_all<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a PlaneEvent>,
        scene: &mut Scene,
    ) -> Vec<SyncOutcome> {
        events.into_iter().map(|event| self.handle(event, scene)).collect()
    }

    fn on_added(&mut self, plane: &DetectedPlane, scene: &mut Scene) -> SyncOutcome {
        if self.registry.contains(plane.id) {
            log::warn!("Plane {}: added while already tracked, replacing", plane.id);
        }

        let outcome = self.install(plane, scene);
        if !matches!(outcome, SyncOutcome::Installed) && !self.registry.contains(plane.id) {
            // Nothing displayed to fall back on; wait for a usable update
            self.pending.insert(plane.id);
        }
        outcome
    }

    fn on_updated(&mut self, plane: &DetectedPlane, scene: &mut Scene) -> SyncOutcome {
        if !self.registry.contains(plane.id) && self.pending.contains(&plane.id) {
            return self.install(plane, scene);
        }
        let Some(tracked) = self.registry.get(plane.id) else {
            return SyncOutcome::Ignored(PlaneError::UnknownIdOnUpdate(plane.id));
        };

        let Some(outline) = plane.complete_outline() else {
            return SyncOutcome::SkippedStale;
        };

        let material = self.policy.material_for(plane.id, Some(&tracked.material));
        match self.builder.build(&outline, &plane.placement, Some(material)) {
            Ok(mesh) => {
                self.registry.upsert(plane.id, mesh, scene);
                SyncOutcome::Rebuilt
            }
            Err(err) => SyncOutcome::Dropped(err),
        }
    }

    /// Build `plane` with a fresh material and install it
    fn install(&mut self, plane: &DetectedPlane, scene: &mut Scene) -> SyncOutcome {
        let Some(outline) = plane.complete_outline() else {
            return SyncOutcome::SkippedStale;
        };

        let material = self.policy.fresh(plane.id);
        match self.builder.build(&outline, &plane.placement, Some(material)) {
            Ok(mesh) => {
                // A fresh material is never shared with a replaced node, so
                // upsert releases the previous node entirely
                self.registry.upsert(plane.id, mesh, scene);
                self.pending.remove(&plane.id);
                SyncOutcome::Installed
            }
            Err(err) => SyncOutcome::Dropped(err),
        }
    }

    fn on_removed(&mut self, plane: &DetectedPlane, scene: &mut Scene) -> SyncOutcome {
        let was_pending = self.pending.remove(&plane.id);
        if self.registry.remove(plane.id, scene) || was_pending {
            SyncOutcome::Removed
        } else {
            SyncOutcome::Ignored(PlaneError::UnknownIdOnRemove(plane.id))
        }
    }

    fn on_session_reset(&mut self, scene: &mut Scene) -> SyncOutcome {
        let released = self.registry.clear(scene);
        self.pending.clear();
        log::info!("Session reset: released {} plane meshes", released);
        SyncOutcome::Reset { released }
    }

    /// Ids whose add could not be meshed yet, in ascending order
    pub fn pending(&self) -> Vec<PlaneId> {
        let mut ids: Vec<_> = self.pending.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Tracked planes
    pub fn registry(&self) -> &PlaneRegistry {
        &self.registry
    }

    /// Outcome counters since creation
    pub fn stats(&self) -> SyncStats {
        self.stats
    }
}
