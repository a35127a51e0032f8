//! Demo configuration

use serde::{Deserialize, Serialize};
use xr_planes::config::{Config, ConfigError, PlaneSyncConfig};

/// Demo settings, loaded from TOML or RON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Synchronizer settings
    pub sync: PlaneSyncConfig,
    /// Frames to simulate
    pub frames: u64,
    /// Most planes the synthetic detector tracks at once
    pub max_planes: usize,
    /// Seed for the synthetic detector
    pub seed: u64,
    /// Restart the XR session every this many frames (0 = never)
    pub restart_every: u64,
    /// Write the generated detector stream here as RON
    pub record_path: Option<String>,
    /// Replay a recorded detector stream instead of generating one
    pub replay_path: Option<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sync: PlaneSyncConfig::default(),
            frames: 600,
            max_planes: 6,
            seed: 2024,
            restart_every: 0,
            record_path: None,
            replay_path: None,
        }
    }
}

impl DemoConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sync.validate()?;
        
        if self.frames == 0 {
            return Err(ConfigError::Invalid("frames must be at least 1".to_string()));
        }
        
        if self.max_planes == 0 {
            return Err(ConfigError::Invalid("max_planes must be at least 1".to_string()));
        }
        
        if self.record_path.is_some() && self.replay_path.is_some() {
            return Err(ConfigError::Invalid("record_path and replay_path are mutually exclusive".to_string()));
        }
        
        Ok(())
    }
}

impl Config for DemoConfig {}
