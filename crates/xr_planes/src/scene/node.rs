//! Scene node: one renderable mesh placed in the world

use std::sync::Arc;

use crate::foundation::math::{Point3, Transform, Vec3};
use crate::physics::Triangle;
use crate::render::{Material, Mesh};

/// A mesh parented into the scene with its material and world placement
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Debug name, e.g. `plane-7`
    pub name: String,
    /// Local-space geometry
    pub mesh: Mesh,
    /// Shared surface material
    pub material: Arc<Material>,
    /// World placement
    pub transform: Transform,
}

impl SceneNode {
    /// Create a node
    pub fn new(name: impl Into<String>, mesh: Mesh, material: Arc<Material>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            mesh,
            material,
            transform,
        }
    }
    
    /// Triangles of this node transformed into world space
    pub fn world_triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        let matrix = self.transform.to_matrix();
        self.mesh.triangles().map(move |[a, b, c]| {
            let world = |v: Vec3| matrix.transform_point(&Point3::from(v)).coords;
            Triangle::new(world(a), world(b), world(c))
        })
    }
}
