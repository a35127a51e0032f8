//! XR feature names and the feature manager lookup table

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::XrError;

/// Optional XR features an application can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeatureName {
    /// Real-world plane detection
    PlaneDetection,
    /// Hit testing against the real world
    HitTest,
    /// Persistent world anchors
    Anchors,
    /// Controller pointer rays and selection
    PointerSelection,
}

impl FeatureName {
    /// Every known feature
    pub const ALL: [FeatureName; 4] = [
        FeatureName::PlaneDetection,
        FeatureName::HitTest,
        FeatureName::Anchors,
        FeatureName::PointerSelection,
    ];
    
    /// Registered name as used by WebXR feature managers
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureName::PlaneDetection => "xr-plane-detection",
            FeatureName::HitTest => "xr-hit-test",
            FeatureName::Anchors => "xr-anchor-system",
            FeatureName::PointerSelection => "xr-controller-pointer-selection",
        }
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureName {
    type Err = XrError;
    
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureName::ALL
            .into_iter()
            .find(|feature| feature.as_str() == s)
            .ok_or_else(|| XrError::UnknownFeature(s.to_string()))
    }
}

/// Lookup table of features the device offers and the ones turned on
#[derive(Debug, Clone, Default)]
pub struct FeatureManager {
    available: BTreeMap<FeatureName, u32>,
    enabled: BTreeMap<FeatureName, u32>,
}

impl FeatureManager {
    /// Create a manager with nothing available
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Create a manager offering every known feature at version 1
    pub fn with_all_features() -> Self {
        FeatureName::ALL
            .into_iter()
            .fold(Self::new(), |manager, feature| manager.with_available(feature, 1))
    }
    
    /// Offer `feature` at `version`
    pub fn with_available(mut self, feature: FeatureName, version: u32) -> Self {
        self.available.insert(feature, version);
        self
    }
    
    /// Turn on the latest version of `feature`
    ///
    /// Returns the enabled version. Enabling twice is harmless.
    pub fn enable(&mut self, feature: FeatureName) -> Result<u32, XrError> {
        let version = *self
            .available
            .get(&feature)
            .ok_or_else(|| XrError::FeatureUnavailable(feature.to_string()))?;
        
        if self.enabled.insert(feature, version).is_none() {
            log::info!("Enabled XR feature {} (version {})", feature, version);
        }
        Ok(version)
    }
    
    /// Turn off `feature`; returns whether it was on
    pub fn disable(&mut self, feature: FeatureName) -> bool {
        self.enabled.remove(&feature).is_some()
    }
    
    /// Whether `feature` is on
    pub fn is_enabled(&self, feature: FeatureName) -> bool {
        self.enabled.contains_key(&feature)
    }
    
    /// Whether the device offers `feature`
    pub fn is_available(&self, feature: FeatureName) -> bool {
        self.available.contains_key(&feature)
    }
    
    /// Enabled features in a stable order
    pub fn enabled_features(&self) -> Vec<FeatureName> {
        self.enabled.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_feature_names_round_trip() {
        for feature in FeatureName::ALL {
            assert_eq!(feature.as_str().parse::<FeatureName>().ok(), Some(feature));
        }
        assert!(matches!("xr-teleport".parse::<FeatureName>(), Err(XrError::UnknownFeature(_))));
    }
    
    #[test]
    fn test_enable_unavailable_feature_fails() {
        let mut manager = FeatureManager::new().with_available(FeatureName::HitTest, 2);
        
        assert!(matches!(
            manager.enable(FeatureName::PlaneDetection),
            Err(XrError::FeatureUnavailable(name)) if name == "xr-plane-detection"
        ));
        assert_eq!(manager.enable(FeatureName::HitTest).ok(), Some(2));
        assert_eq!(manager.enabled_features(), vec![FeatureName::HitTest]);
    }
    
    #[test]
    fn test_enable_is_idempotent_and_disable_reports() {
        let mut manager = FeatureManager::with_all_features();
        
        assert!(manager.enable(FeatureName::Anchors).is_ok());
        assert!(manager.enable(FeatureName::Anchors).is_ok());
        assert_eq!(manager.enabled_features().len(), 1);
        
        assert!(manager.disable(FeatureName::Anchors));
        assert!(!manager.disable(FeatureName::Anchors));
        assert!(!manager.is_enabled(FeatureName::Anchors));
        assert!(manager.is_available(FeatureName::Anchors));
    }
}
