//! Configuration system
//!
//! Serde-backed configuration loadable from TOML or RON, selected by the
//! file extension.

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;
        
        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }
    
    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };
        
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    
    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),
    
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
    
    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    
    /// Values parsed but out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// # Plane Synchronization Configuration
///
/// Tunables for the plane mesh synchronizer and the session that drives it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneSyncConfig {
    /// Translucency applied to every freshly issued plane material
    pub plane_alpha: f32,
    /// Minimum distinct outline points a plane needs to be meshed
    pub min_outline_points: usize,
    /// Seed for plane colors; `None` draws from OS entropy
    pub material_seed: Option<u64>,
    /// Also enable the hit-test feature so controller rays can pick planes
    pub enable_hit_test: bool,
    /// Default log level when `RUST_LOG` is not set
    pub log_level: String,
}

impl Default for PlaneSyncConfig {
    fn default() -> Self {
        Self {
            plane_alpha: 0.35,
            min_outline_points: 3,
            material_seed: None,
            enable_hit_test: true,
            log_level: "info".to_string(),
        }
    }
}

impl PlaneSyncConfig {
    /// Set a fixed material seed
    pub fn with_material_seed(mut self, seed: u64) -> Self {
        self.material_seed = Some(seed);
        self
    }
    
    /// Set the plane material translucency
    pub fn with_plane_alpha(mut self, alpha: f32) -> Self {
        self.plane_alpha = alpha;
        self
    }
    
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.plane_alpha > 0.0 && self.plane_alpha <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "plane_alpha must be in (0, 1], got {}",
                self.plane_alpha
            )));
        }
        
        if self.min_outline_points < 3 {
            return Err(ConfigError::Invalid(format!(
                "min_outline_points must be at least 3, got {}",
                self.min_outline_points
            )));
        }
        
        Ok(())
    }
}

impl Config for PlaneSyncConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_default_config_is_valid() {
        let config = PlaneSyncConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_outline_points, 3);
        assert!((config.plane_alpha - 0.35).abs() < f32::EPSILON);
    }
    
    #[test]
    fn test_rejects_out_of_range_alpha() {
        let config = PlaneSyncConfig::default().with_plane_alpha(0.0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        
        let config = PlaneSyncConfig::default().with_plane_alpha(1.5);
        assert!(config.validate().is_err());
    }
    
    #[test]
    fn test_rejects_too_few_outline_points() {
        let config = PlaneSyncConfig {
            min_outline_points: 2,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
    
    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: PlaneSyncConfig = toml::from_str("plane_alpha = 0.5\nmaterial_seed = 7\n")
            .expect("partial config should parse");
        
        assert!((config.plane_alpha - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.material_seed, Some(7));
        assert_eq!(config.min_outline_points, 3);
        assert!(config.enable_hit_test);
    }
    
    #[test]
    fn test_ron_round_trip_through_file() {
        let path = std::env::temp_dir().join(format!("xr_planes_config_{}.ron", std::process::id()));
        let path = path.to_string_lossy().to_string();
        
        let config = PlaneSyncConfig::default().with_material_seed(42);
        config.save_to_file(&path).expect("save should succeed");
        let loaded = PlaneSyncConfig::load_from_file(&path).expect("load should succeed");
        let _ = std::fs::remove_file(&path);
        
        assert_eq!(loaded.material_seed, Some(42));
    }
    
    #[test]
    fn test_unknown_extension_is_rejected() {
        let result = PlaneSyncConfig::default().save_to_file("settings.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
