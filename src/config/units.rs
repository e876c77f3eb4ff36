//! Unit types for physical quantities.
//!
//! Provides type-safe representations of durations and sampling steps so a
//! step that was never validated cannot reach the discretizer.

use core::ops::{Add, Mul, Sub};

use serde::Deserialize;

use crate::error::ConfigError;

/// Duration or time instant in seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Seconds(pub f64);

impl Seconds {
    /// Create a new Seconds value.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Check that the value is finite and strictly positive.
    #[inline]
    pub fn is_positive(self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }
}

impl Add for Seconds {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Seconds {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<f64> for Seconds {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

/// Fixed sampling step of a discretized trajectory.
///
/// Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeStep(f64);

impl TimeStep {
    /// Create a validated time step.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTimeStep` if the step is not finite or not > 0.
    pub fn new(seconds: f64) -> Result<Self, ConfigError> {
        if seconds.is_finite() && seconds > 0.0 {
            Ok(Self(seconds))
        } else {
            Err(ConfigError::InvalidTimeStep(seconds))
        }
    }

    /// Get the step in seconds.
    #[inline]
    pub const fn seconds(self) -> f64 {
        self.0
    }
}

impl TryFrom<Seconds> for TimeStep {
    type Error = ConfigError;

    fn try_from(value: Seconds) -> Result<Self, Self::Error> {
        Self::new(value.0)
    }
}
