//! # XR Planes
//!
//! Keeps the real-world planes reported by an XR plane detector mirrored as
//! renderable meshes.
//!
//! ## Features
//!
//! - **Plane Synchronization**: one flat, translucent, collidable mesh per detected plane
//! - **Stable Materials**: planes keep their color while the detector refines them
//! - **Fault Tolerant**: incomplete or degenerate detector frames never disturb the scene
//! - **Runtime Agnostic**: XR runtimes plug in through the `XrSystem` trait
//! - **Picking**: controller rays can select the plane they point at
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use xr_planes::prelude::*;
//!
//! let mut system = SimulatedXrSystem::new(FeatureManager::with_all_features());
//! system.start_session();
//!
//! let mut scene = Scene::new();
//! let mut session = PlaneTrackingSession::new(system, &PlaneSyncConfig::default());
//!
//! // Once per frame
//! let report = session.update(&mut scene);
//! for outcome in &report.outcomes {
//!     log::debug!("{:?}", outcome);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod physics;
pub mod planes;
pub mod render;
pub mod scene;
pub mod xr;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, PlaneSyncConfig},
        foundation::math::{Mat4, Transform, Vec2, Vec3},
        physics::Ray,
        planes::{
            DetectedPlane, PlaneError, PlaneEvent, PlaneHit, PlaneId, PlaneSynchronizer,
            PlaneTrackingSession, SyncOutcome,
        },
        render::{Material, Mesh},
        scene::Scene,
        xr::{FeatureManager, FeatureName, SimulatedXrSystem, XrError, XrSystem},
    };
}
