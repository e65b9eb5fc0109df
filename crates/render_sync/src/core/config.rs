//! # View Configuration
//!
//! Configuration for the render-state synchronization engine: which
//! graphics API flavor the render context is built on, and the coarse GPU
//! tier a device profile is derived from.
//!
//! ## Design Goals
//!
//! - **Serializable**: Support for multiple config file formats (TOML, RON)
//! - **Type Safe**: Strong typing with defaults
//! - **Minimal**: The renderer itself is an external collaborator; only the
//!   knobs this engine acts on live here

use serde::{Deserialize, Serialize};

/// Configuration trait
///
/// Provides file-based load/save in TOML or RON, selected by extension.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

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
            ron::ser::to_string_pretty(self, Default::default())
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
}

/// Graphics API flavor the render context is built on
///
/// The state tree has the same shape for every flavor; only backend-specific
/// defaults (sample count, surface flags) differ between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GraphicsApi {
    /// Vulkan-class backend: multisampled, linear-color output surface
    #[default]
    Vulkan,
    /// OpenGL-class fallback backend: single-sampled sRGB output surface
    OpenGl,
}

/// Coarse GPU capability tier
///
/// Hosts report a tier rather than enumerating device capabilities; the
/// engine derives a [`DeviceProfile`] from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum GpuTier {
    /// Integrated or mobile-class GPU
    Low,
    /// Mainstream discrete GPU
    #[default]
    Medium,
    /// High-end discrete GPU
    High,
}

/// Render-quality profile derived from the device tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// Geometry detail bias multiplier
    pub detail_bias: f32,

    /// Render-resolution modifier applied to the surface size
    pub resolution_modifier: f32,

    /// Maximum MSAA sample count the profile permits
    pub max_samples: u32,
}

impl DeviceProfile {
    /// Derive a profile from a GPU tier
    pub fn for_tier(tier: GpuTier) -> Self {
        match tier {
            GpuTier::Low => Self {
                detail_bias: 0.25,
                resolution_modifier: 0.75,
                max_samples: 1,
            },
            GpuTier::Medium => Self {
                detail_bias: 1.0,
                resolution_modifier: 1.0,
                max_samples: 4,
            },
            GpuTier::High => Self {
                detail_bias: 2.5,
                resolution_modifier: 1.0,
                max_samples: 8,
            },
        }
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::for_tier(GpuTier::default())
    }
}

/// Top-level view configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Graphics API flavor used for state-tree defaults
    pub api: GraphicsApi,

    /// GPU tier the device profile is derived from
    pub tier: GpuTier,
}

impl ViewConfig {
    /// Create a configuration for the given API flavor
    pub fn new(api: GraphicsApi) -> Self {
        Self {
            api,
            tier: GpuTier::default(),
        }
    }

    /// Set the GPU tier
    pub fn with_tier(mut self, tier: GpuTier) -> Self {
        self.tier = tier;
        self
    }

    /// Derive the device profile for the configured tier
    pub fn device_profile(&self) -> DeviceProfile {
        DeviceProfile::for_tier(self.tier)
    }
}

impl Config for ViewConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ViewConfig::default();
        assert_eq!(config.api, GraphicsApi::Vulkan);
        assert_eq!(config.tier, GpuTier::Medium);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ViewConfig::new(GraphicsApi::OpenGl).with_tier(GpuTier::High);
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: ViewConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = ViewConfig::new(GraphicsApi::Vulkan).with_tier(GpuTier::Low);
        let text = ron::ser::to_string_pretty(&config, Default::default()).unwrap();
        let parsed: ViewConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_unsupported_format_rejected() {
        let err = ViewConfig::default().save_to_file("view.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_tier_profiles_are_ordered() {
        let low = DeviceProfile::for_tier(GpuTier::Low);
        let high = DeviceProfile::for_tier(GpuTier::High);
        assert!(low.detail_bias < high.detail_bias);
        assert!(low.max_samples < high.max_samples);
    }
}
