//! Render-side data
//!
//! Backend-agnostic mesh and material types handed to the host engine.

pub mod mesh;
pub mod material;

pub use mesh::{Mesh, MeshFlags, Vertex};
pub use material::{AlphaMode, Material, MaterialId};
