//! Mesh representation for plane geometry
//!
//! Pure CPU-side geometry containers. Nothing here knows about a rendering
//! backend; the host engine uploads vertices and indices however it likes.

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::Vec3;

bitflags::bitflags! {
    /// Per-mesh behavior flags read by the host engine
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MeshFlags: u32 {
        /// Participates in ray casts and physics queries
        const COLLIDABLE = 1 << 0;
        /// Receives shadows cast by other meshes
        const RECEIVE_SHADOWS = 1 << 1;
    }
}

impl Default for MeshFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// 3D vertex data structure for rendering
/// 
/// Represents a single vertex with position, normal, and texture coordinate data.
/// The `#[repr(C)]` layout keeps the struct ready for direct GPU buffer uploads.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in 3D space
    pub position: [f32; 3],
    
    /// Normal vector
    pub normal: [f32; 3],
    
    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// 3D mesh containing vertices and indices for rendering
/// 
/// Geometry lives in the mesh's local frame; the owning scene node carries the
/// world placement.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,
    
    /// Index data for triangles
    pub indices: Vec<u32>,
    
    /// Behavior flags
    pub flags: MeshFlags,
}

impl Mesh {
    /// Create a new mesh
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            indices,
            flags: MeshFlags::empty(),
        }
    }
    
    /// Set behavior flags
    pub fn with_flags(mut self, flags: MeshFlags) -> Self {
        self.flags = flags;
        self
    }
    
    /// Number of triangles described by the index buffer
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
    
    /// Whether ray casts should consider this mesh
    pub fn is_collidable(&self) -> bool {
        self.flags.contains(MeshFlags::COLLIDABLE)
    }
    
    /// Iterate triangles as local-space corner positions
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            let corner = |i: u32| Vec3::from(self.vertices[i as usize].position);
            [corner(tri[0]), corner(tri[1]), corner(tri[2])]
        })
    }
    
    /// Recompute smooth vertex normals from the triangle faces
    ///
    /// Face normals are accumulated unnormalized, so larger triangles weigh
    /// more. Vertices not referenced by any triangle keep a +Y normal.
    pub fn compute_normals(&mut self) {
        let mut accumulated = vec![Vec3::zeros(); self.vertices.len()];
        
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let p0 = Vec3::from(self.vertices[a].position);
            let p1 = Vec3::from(self.vertices[b].position);
            let p2 = Vec3::from(self.vertices[c].position);
            let face = (p1 - p0).cross(&(p2 - p0));
            
            accumulated[a] += face;
            accumulated[b] += face;
            accumulated[c] += face;
        }
        
        for (vertex, normal) in self.vertices.iter_mut().zip(accumulated) {
            let normal = normal
                .try_normalize(f32::EPSILON)
                .unwrap_or_else(|| Vec3::new(0.0, 1.0, 0.0));
            vertex.normal = normal.into();
        }
    }
    
    /// Release the geometry buffers, keeping the flags
    pub fn release(&mut self) {
        self.vertices = Vec::new();
        self.indices = Vec::new();
    }
}
