//! Ray casting against tracked plane meshes
//!
//! Lets a controller or gaze ray select the detected surface it points at.

use crate::foundation::math::Vec3;
use crate::physics::Ray;
use crate::scene::Scene;

use super::{PlaneId, PlaneRegistry};

/// Nearest intersection of a ray with a tracked plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneHit {
    /// Plane that was hit
    pub plane_id: PlaneId,
    /// Distance from the ray origin
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
    /// World-space surface normal of the hit triangle
    pub normal: Vec3,
}

/// Cast `ray` against every collidable tracked plane and return the nearest hit
pub fn pick_plane(ray: &Ray, registry: &PlaneRegistry, scene: &Scene) -> Option<PlaneHit> {
    let mut closest: Option<PlaneHit> = None;

    for (plane_id, tracked) in registry.iter() {
        let Some(node) = scene.get(tracked.node) else {
            continue;
        };
        if !node.mesh.is_collidable() {
            continue;
        }

        for triangle in node.world_triangles() {
            let Some((distance, _, _)) = triangle.intersect_ray(ray) else {
                continue;
            };
            if closest.map_or(true, |hit| distance < hit.distance) {
                closest = Some(PlaneHit {
                    plane_id,
                    distance,
                    point: ray.point_at(distance),
                    normal: triangle.normal(),
                });
            }
        }
    }

    closest
}
