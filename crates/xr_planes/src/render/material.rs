//! Material definitions for plane meshes
//!
//! Materials are shared between scene nodes through `Arc<Material>`; a plane
//! that is rebuilt keeps pointing at the same allocation, which is what keeps
//! its color stable across detector updates.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::foundation::math::Vec3;

static NEXT_MATERIAL_ID: AtomicU32 = AtomicU32::new(1);

/// Unique identifier for materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u32);

impl MaterialId {
    /// Allocate a process-wide unique id
    pub fn next() -> Self {
        Self(NEXT_MATERIAL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Alpha blending modes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AlphaMode {
    /// No transparency
    #[default]
    Opaque,
    /// Alpha testing with cutoff value
    Mask(f32),
    /// Alpha blending
    Blend,
}

/// Surface material for a scene node
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Unique identifier for this material
    pub id: MaterialId,
    /// Optional name for debugging
    pub name: Option<String>,
    /// Diffuse color, RGB in [0, 1]
    pub color: Vec3,
    /// Alpha transparency value
    pub alpha: f32,
    /// How alpha is applied
    pub alpha_mode: AlphaMode,
}

impl Default for Material {
    fn default() -> Self {
        Self::opaque(Vec3::new(0.8, 0.8, 0.8))
    }
}

impl Material {
    /// Create an opaque material
    pub fn opaque(color: Vec3) -> Self {
        Self {
            id: MaterialId::next(),
            name: None,
            color,
            alpha: 1.0,
            alpha_mode: AlphaMode::Opaque,
        }
    }
    
    /// Create an alpha-blended material
    pub fn translucent(color: Vec3, alpha: f32) -> Self {
        Self {
            id: MaterialId::next(),
            name: None,
            color,
            alpha,
            alpha_mode: AlphaMode::Blend,
        }
    }
    
    /// Set the material name for debugging
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
    
    /// Whether the renderer needs to blend this material
    pub fn requires_blending(&self) -> bool {
        matches!(self.alpha_mode, AlphaMode::Blend)
    }
    
    /// Base color as RGBA
    pub fn base_color_array(&self) -> [f32; 4] {
        [self.color.x, self.color.y, self.color.z, self.alpha]
    }
}
