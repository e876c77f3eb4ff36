//! # com-motion
//!
//! Pluggable center-of-mass (CoM) motion representations for legged-robot
//! trajectory optimization.
//!
//! ## Features
//!
//! - **One contract, many representations**: [`ComMotion`] maps a flat vector
//!   of free coefficients to a continuous planar CoM state
//! - **Phase segmentation**: every instant is tagged as stance, step or flight,
//!   with ids that pair phases with footholds
//! - **Shared discretization**: one regular time grid that always starts at 0
//!   and ends exactly at the total time
//! - **Spline and pendulum models**: C¹ quintic splines and closed-form linear
//!   inverted pendulum solutions
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use com_motion::{ComMotion, PlanConfig};
//!
//! // Load configuration from TOML
//! let config: PlanConfig = com_motion::load_config("plan.toml")?;
//!
//! // Build a named motion with default coefficients
//! let mut motion = config.build("walk")?;
//!
//! // Optimizer round trip
//! let mut x = motion.coefficients();
//! x[0] = 0.1;
//! motion.set_coefficients(&x)?;
//!
//! // Sample at the discretization nodes
//! for t in motion.discretized_global_times() {
//!     let state = motion.com(t)?;
//!     let phase = motion.current_phase(t)?;
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and boxed motions
//! - `log` (default): Emits diagnostics through the `log` facade
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Emits diagnostics through defmt on embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod phase;

// Re-exports for ergonomic API
pub use config::{validate_config, MotionConfig, PlanConfig, Representation};
pub use error::{Error, Result};
pub use motion::{
    ComMotion, ComState, ConfiguredMotion, Discretizer, PendulumComMotion, SplineComMotion, Vec2,
};
pub use phase::{PhaseInfo, PhaseTimeline, PhaseType};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{build_motion, load_config};

// Unit types
pub use config::units::{Seconds, TimeStep};
