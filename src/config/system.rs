//! Plan configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::motion::ConfiguredMotion;

use super::motion::MotionConfig;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanConfig {
    /// Named motion configurations.
    #[serde(default)]
    pub motions: FnvIndexMap<String<32>, MotionConfig, 8>,
}

impl PlanConfig {
    /// Get a motion configuration by name.
    pub fn motion(&self, name: &str) -> Option<&MotionConfig> {
        self.motions
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all motion names.
    pub fn motion_names(&self) -> impl Iterator<Item = &str> {
        self.motions.keys().map(|s| s.as_str())
    }

    /// Build a named motion with default coefficients.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MotionNotFound` for an unknown name, or any
    /// error from [`MotionConfig::build`].
    pub fn build(&self, name: &str) -> Result<ConfiguredMotion> {
        let config = self.motion(name).ok_or_else(|| {
            ConfigError::MotionNotFound(String::try_from(name).unwrap_or_default())
        })?;
        config.build_named(name)
    }
}
