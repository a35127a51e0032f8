//! Scene container
//!
//! Holds every mesh node the host engine should draw. Nodes are addressed
//! through stable slot-map handles so a plane's node can be replaced without
//! invalidating anyone else's.

mod node;

pub use node::SceneNode;

use std::sync::Arc;

use crate::foundation::collections::{HandleMap, NodeHandle};
use crate::render::Material;

/// How much of a node to release when it leaves the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisposeMode {
    /// Drop the geometry and hand the material back to the caller
    GeometryOnly,
    /// Drop geometry and this node's material reference
    Full,
}

/// Running resource counters, mostly useful for tests and diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Nodes ever added
    pub nodes_added: usize,
    /// Node geometries released
    pub geometries_released: usize,
    /// Material references released through full disposal
    pub materials_released: usize,
}

/// Flat scene of mesh nodes
#[derive(Debug, Default)]
pub struct Scene {
    nodes: HandleMap<SceneNode>,
    stats: SceneStats,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Parent a node into the scene
    pub fn add(&mut self, node: SceneNode) -> NodeHandle {
        log::trace!("Scene: adding node '{}' ({} triangles)", node.name, node.mesh.triangle_count());
        self.stats.nodes_added += 1;
        self.nodes.insert(node)
    }
    
    /// Look up a node
    pub fn get(&self, handle: NodeHandle) -> Option<&SceneNode> {
        self.nodes.get(handle)
    }
    
    /// Whether the handle still refers to a live node
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.nodes.contains_key(handle)
    }
    
    /// Remove a node and release its resources
    ///
    /// With [`DisposeMode::GeometryOnly`] the node's material is returned so the
    /// caller can keep using it. Disposing a stale handle is a no-op.
    pub fn dispose(&mut self, handle: NodeHandle, mode: DisposeMode) -> Option<Arc<Material>> {
        let mut node = self.nodes.remove(handle)?;
        node.mesh.release();
        self.stats.geometries_released += 1;
        
        match mode {
            DisposeMode::GeometryOnly => {
                log::trace!("Scene: released geometry of '{}'", node.name);
                Some(node.material)
            }
            DisposeMode::Full => {
                log::trace!("Scene: released '{}' and its material {:?}", node.name, node.material.id);
                self.stats.materials_released += 1;
                None
            }
        }
    }
    
    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    
    /// Whether the scene has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    
    /// Iterate live nodes
    pub fn iter(&self) -> impl Iterator<Item = (NodeHandle, &SceneNode)> {
        self.nodes.iter()
    }
    
    /// Resource counters
    pub fn stats(&self) -> SceneStats {
        self.stats
    }
}
