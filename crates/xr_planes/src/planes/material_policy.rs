//! Material assignment policy
//!
//! Brand-new planes get a fresh random color. Updates keep whatever material
//! the plane already has, otherwise a plane being refined several times a
//! second would flicker through colors.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::foundation::math::Vec3;
use crate::render::Material;

use super::PlaneId;

/// Issues plane materials
#[derive(Debug)]
pub struct MaterialPolicy {
    alpha: f32,
    rng: StdRng,
}

impl MaterialPolicy {
    /// Create a policy issuing materials with the given translucency
    ///
    /// A seed makes the color sequence reproducible.
    pub fn new(alpha: f32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { alpha, rng }
    }
    
    /// Translucency of issued materials
    pub fn alpha(&self) -> f32 {
        self.alpha
    }
    
    /// Material for plane `id`
    ///
    /// Returns `previous` itself when present, a fresh random material otherwise.
    pub fn material_for(&mut self, id: PlaneId, previous: Option<&Arc<Material>>) -> Arc<Material> {
        match previous {
            Some(material) => Arc::clone(material),
            None => self.fresh(id),
        }
    }
    
    /// A new material with a uniformly random color
    pub fn fresh(&mut self, id: PlaneId) -> Arc<Material> {
        let color = Vec3::new(self.rng.gen(), self.rng.gen(), self.rng.gen());
        log::trace!("Plane {}: new material color {:?}", id, color);
        Arc::new(Material::translucent(color, self.alpha).with_name(format!("plane-{}-material", id)))
    }
}

impl Default for MaterialPolicy {
    fn default() -> Self {
        Self::new(0.35, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::AlphaMode;
    
    #[test]
    fn test_fresh_material_is_translucent_and_random() {
        let mut policy = MaterialPolicy::new(0.35, Some(1));
        let a = policy.material_for(PlaneId(1), None);
        let b = policy.material_for(PlaneId(2), None);
        
        assert_eq!(a.alpha_mode, AlphaMode::Blend);
        assert!((a.alpha - 0.35).abs() < f32::EPSILON);
        assert_ne!(a.id, b.id);
        assert_ne!(a.color, b.color);
        assert!(a.color.iter().all(|c| (0.0..1.0).contains(c)));
        assert_eq!(a.name.as_deref(), Some("plane-1-material"));
    }
    
    #[test]
    fn test_previous_material_is_reused() {
        let mut policy = MaterialPolicy::new(0.35, Some(1));
        let original = policy.material_for(PlaneId(3), None);
        let reused = policy.material_for(PlaneId(3), Some(&original));
        
        assert!(Arc::ptr_eq(&original, &reused));
    }
    
    #[test]
    fn test_seed_reproduces_colors() {
        let mut first = MaterialPolicy::new(0.5, Some(99));
        let mut second = MaterialPolicy::new(0.5, Some(99));
        
        assert_eq!(first.fresh(PlaneId(1)).color, second.fresh(PlaneId(1)).color);
    }
}
