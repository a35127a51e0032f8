//! Detected-plane mesh synchronization
//!
//! Keeps the set of real-world planes reported by an XR plane detector
//! mirrored as flat, translucent, collidable meshes in a [`Scene`](crate::scene::Scene):
//!
//! - [`PolygonBuilder`] turns an outline and placement into a mesh
//! - [`PlaneRegistry`] holds at most one mesh per plane id
//! - [`MaterialPolicy`] decides between a fresh color and the plane's old one
//! - [`PlaneSynchronizer`] applies [`PlaneEvent`]s to the registry
//! - [`PlaneTrackingSession`] bootstraps an [`XrSystem`](crate::xr::XrSystem)
//!   and pumps its events every frame

mod builder;
mod error;
mod event;
mod material_policy;
mod picking;
mod plane;
mod registry;
mod session;
mod sync;

#[cfg(test)]
mod tests;

pub use builder::{PlaneMesh, PolygonBuilder};
pub use error::PlaneError;
pub use event::PlaneEvent;
pub use material_policy::MaterialPolicy;
pub use picking::{pick_plane, PlaneHit};
pub use plane::{DetectedPlane, PlaneId};
pub use registry::{PlaneRegistry, TrackedMesh};
pub use session::{FrameReport, PlaneTrackingSession};
pub use sync::{PlaneSynchronizer, SyncOutcome, SyncStats};
