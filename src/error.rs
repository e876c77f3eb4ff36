//! Error types for com-motion library.
//!
//! Provides unified error handling across configuration, phase timelines, and
//! motion representations.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all com-motion operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Phase timeline construction or lookup error
    Phase(PhaseError),
    /// Motion representation usage error
    Motion(MotionError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Discretization step must be finite and > 0
    InvalidTimeStep(f64),
    /// Motion declares no phases
    NoPhases(heapless::String<32>),
    /// Phase duration must be finite and > 0
    InvalidPhaseDuration {
        /// Motion name
        motion: heapless::String<32>,
        /// Offending duration in seconds
        duration: f64,
    },
    /// Initial position or velocity contains NaN or infinity
    NonFiniteInitialState(heapless::String<32>),
    /// Pendulum motion without a `[pendulum]` section
    MissingPendulum(heapless::String<32>),
    /// Pendulum height must be finite and > 0
    InvalidPendulumHeight(f64),
    /// Gravity must be finite and > 0
    InvalidGravity(f64),
    /// Motion name not found in configuration
    MotionNotFound(heapless::String<32>),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Phase timeline errors.
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseError {
    /// Phase duration must be finite and > 0
    InvalidDuration(f64),
    /// Timeline is full (max 32 phases)
    TooManyPhases,
    /// Timeline has no phases
    EmptyTimeline,
    /// Representation needs more free coefficients than it can hold
    TooManyCoefficients {
        /// Coefficients the timeline would require
        required: usize,
        /// Coefficient capacity
        max: usize,
    },
}

/// Motion representation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionError {
    /// Coefficient vector length differs from the free coefficient count
    DimensionMismatch {
        /// Free coefficient count of the motion
        expected: usize,
        /// Length of the rejected vector
        actual: usize,
    },
    /// Coefficient vector contains NaN or infinity
    NonFiniteCoefficient {
        /// Index of the first offending entry
        index: usize,
    },
    /// Query time outside `[0, total_time]`
    OutOfRangeTime {
        /// Requested global time
        t: f64,
        /// Total duration of the motion
        total: f64,
    },
    /// Terminal state cannot be made equal to the initial state
    UnderivableBoundary,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Phase(e) => write!(f, "Phase error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidTimeStep(v) => {
                write!(f, "Invalid discretization step: {}. Must be finite and > 0", v)
            }
            ConfigError::NoPhases(name) => write!(f, "Motion '{}' declares no phases", name),
            ConfigError::InvalidPhaseDuration { motion, duration } => {
                write!(f, "Motion '{}' has invalid phase duration {}. Must be > 0", motion, duration)
            }
            ConfigError::NonFiniteInitialState(name) => {
                write!(f, "Motion '{}' has a non-finite initial state", name)
            }
            ConfigError::MissingPendulum(name) => {
                write!(f, "Pendulum motion '{}' is missing its [pendulum] section", name)
            }
            ConfigError::InvalidPendulumHeight(v) => write!(f, "Invalid pendulum height: {}. Must be > 0", v),
            ConfigError::InvalidGravity(v) => write!(f, "Invalid gravity: {}. Must be > 0", v),
            ConfigError::MotionNotFound(name) => write!(f, "Motion '{}' not found", name),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for PhaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseError::InvalidDuration(v) => write!(f, "Invalid phase duration: {}. Must be finite and > 0", v),
            PhaseError::TooManyPhases => write!(f, "Too many phases (max 32)"),
            PhaseError::EmptyTimeline => write!(f, "Phase timeline is empty"),
            PhaseError::TooManyCoefficients { required, max } => {
                write!(f, "Motion needs {} free coefficients, capacity is {}", required, max)
            }
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::DimensionMismatch { expected, actual } => {
                write!(f, "Expected {} coefficients, got {}", expected, actual)
            }
            MotionError::NonFiniteCoefficient { index } => {
                write!(f, "Coefficient {} is not finite", index)
            }
            MotionError::OutOfRangeTime { t, total } => {
                write!(f, "Time {} outside motion range [0, {}]", t, total)
            }
            MotionError::UnderivableBoundary => {
                write!(f, "Cannot derive coefficients that end the motion at its start")
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<PhaseError> for Error {
    fn from(e: PhaseError) -> Self {
        Error::Phase(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for PhaseError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}
