//! Motion module for com-motion.
//!
//! Provides the center-of-mass motion contract, the shared time
//! discretization, and the concrete spline and pendulum representations.

mod com_motion;
mod configured;
mod discretizer;
mod pendulum;
mod spline;
mod state;

#[cfg(feature = "std")]
pub use com_motion::SharedComMotion;
pub use com_motion::{ComMotion, Coefficients, MAX_COEFFICIENTS};
pub use configured::ConfiguredMotion;
pub use discretizer::{Discretizer, MULTIPLE_TOLERANCE};
pub use pendulum::{PendulumComMotion, PendulumParams, PENDULUM_COEFF_PER_PHASE, STANDARD_GRAVITY};
pub use spline::{SplineComMotion, SPLINE_COEFF_PER_AXIS, SPLINE_COEFF_PER_PHASE};
pub use state::{AxisState, ComState, Vec2};
