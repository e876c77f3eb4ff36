//! Configuration module for com-motion.
//!
//! Provides types for loading and validating motion configurations from TOML
//! files (with `std` feature) or pre-parsed data.

mod motion;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

#[cfg(feature = "std")]
pub use motion::build_motion;
pub use motion::{MotionConfig, PendulumConfig, PhaseConfig, Representation};
pub use system::PlanConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Seconds, TimeStep};
