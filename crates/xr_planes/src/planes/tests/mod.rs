//! Cross-component tests for the plane pipeline

mod sync_properties;
