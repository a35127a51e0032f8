//! Plane registry: plane id -> the mesh currently displayed for it

use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::collections::NodeHandle;
use crate::foundation::math::Transform;
use crate::render::Material;
use crate::scene::{DisposeMode, Scene, SceneNode};

use super::{PlaneId, PlaneMesh};

/// The mesh installed for one plane
#[derive(Debug, Clone)]
pub struct TrackedMesh {
    /// Scene node holding the geometry
    pub node: NodeHandle,
    /// Material shared with the node
    pub material: Arc<Material>,
    /// World placement of the node
    pub transform: Transform,
}

/// Sparse mapping from plane id to its tracked mesh
///
/// Holds at most one mesh per id. Lives for one XR session.
#[derive(Debug, Default)]
pub struct PlaneRegistry {
    meshes: HashMap<PlaneId, TrackedMesh>,
}

impl PlaneRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Install `mesh` for `id`, replacing any previous mesh
    ///
    /// The replaced node's geometry is released right after the new node is
    /// installed. Its material is only released too when the new mesh does not
    /// share it.
    pub fn upsert(&mut self, id: PlaneId, mesh: PlaneMesh, scene: &mut Scene) {
        let PlaneMesh { mesh, material, transform } = mesh;
        let node = scene.add(SceneNode::new(
            format!("plane-{}", id),
            mesh,
            Arc::clone(&material),
            transform.clone(),
        ));
        
        let previous = self.meshes.insert(id, TrackedMesh { node, material, transform });
        
        if let Some(old) = previous {
            let retained = Arc::ptr_eq(&old.material, &self.meshes[&id].material);
            let mode = if retained { DisposeMode::GeometryOnly } else { DisposeMode::Full };
            scene.dispose(old.node, mode);
        }
    }
    
    /// Release the mesh for `id` entirely
    ///
    /// Returns `false` if nothing was tracked; redundant removals are expected.
    pub fn remove(&mut self, id: PlaneId, scene: &mut Scene) -> bool {
        match self.meshes.remove(&id) {
            Some(tracked) => {
                scene.dispose(tracked.node, DisposeMode::Full);
                true
            }
            None => false,
        }
    }
    
    /// Release every tracked mesh and forget all ids
    ///
    /// Returns how many meshes were released.
    pub fn clear(&mut self, scene: &mut Scene) -> usize {
        let released = self.meshes.len();
        for (_, tracked) in self.meshes.drain() {
            scene.dispose(tracked.node, DisposeMode::Full);
        }
        released
    }
    
    /// Mesh currently installed for `id`
    pub fn get(&self, id: PlaneId) -> Option<&TrackedMesh> {
        self.meshes.get(&id)
    }
    
    /// Whether `id` is tracked
    pub fn contains(&self, id: PlaneId) -> bool {
        self.meshes.contains_key(&id)
    }
    
    /// Number of tracked planes
    pub fn len(&self) -> usize {
        self.meshes.len()
    }
    
    /// Whether no plane is tracked
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
    
    /// Tracked ids in ascending order
    pub fn ids(&self) -> Vec<PlaneId> {
        let mut ids: Vec<_> = self.meshes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
    
    /// Iterate tracked meshes in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (PlaneId, &TrackedMesh)> {
        self.meshes.iter().map(|(id, tracked)| (*id, tracked))
    }
}
