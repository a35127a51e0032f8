//! XR capability layer
//!
//! Feature enablement and event delivery, modeled as an opaque capability
//! provider so the plane pipeline never depends on a specific runtime.

mod features;
mod simulated;
mod system;

pub use features::{FeatureManager, FeatureName};
pub use simulated::SimulatedXrSystem;
pub use system::XrSystem;

use thiserror::Error;

/// XR runtime errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XrError {
    /// The device or runtime does not offer the feature
    #[error("XR feature unavailable: {0}")]
    FeatureUnavailable(String),
    
    /// The feature name is not recognized
    #[error("Unknown XR feature: {0}")]
    UnknownFeature(String),
}
