//! Motion configuration from TOML.

use heapless::Vec;
use serde::Deserialize;

use crate::error::{ConfigError, Result};
use crate::motion::{
    ConfiguredMotion, PendulumComMotion, PendulumParams, SplineComMotion, Vec2, STANDARD_GRAVITY,
};
use crate::phase::{PhaseTimeline, PhaseType, MAX_PHASES};

use super::units::{Seconds, TimeStep};

/// Which concrete representation maps coefficients to CoM states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    /// Piecewise quintic spline, free polynomial coefficients.
    #[default]
    Spline,
    /// Linear inverted pendulum, free centers of pressure.
    Pendulum,
}

/// One phase of the configured timeline.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PhaseConfig {
    /// Support configuration.
    pub kind: PhaseType,

    /// Phase duration in seconds.
    #[serde(rename = "duration_s")]
    pub duration: Seconds,
}

/// Linear inverted pendulum parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PendulumConfig {
    /// CoM height in meters.
    #[serde(rename = "height_m")]
    pub height: f64,

    /// Gravitational acceleration in m/s².
    #[serde(default = "default_gravity")]
    pub gravity: f64,
}

fn default_gravity() -> f64 {
    STANDARD_GRAVITY
}

/// A named motion from configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MotionConfig {
    /// Concrete representation.
    #[serde(default)]
    pub representation: Representation,

    /// Sampling step for discretized constraints in seconds.
    #[serde(rename = "discretization_step_s")]
    pub discretization_step: Seconds,

    /// CoM position at t = 0.
    #[serde(default)]
    pub initial_position: [f64; 2],

    /// CoM velocity at t = 0.
    #[serde(default)]
    pub initial_velocity: [f64; 2],

    /// Phases in time order (max 32).
    #[serde(default)]
    pub phases: Vec<PhaseConfig, MAX_PHASES>,

    /// Pendulum parameters, required for the pendulum representation.
    #[serde(default)]
    pub pendulum: Option<PendulumConfig>,
}

impl MotionConfig {
    /// Total configured duration in seconds.
    pub fn total_time(&self) -> Seconds {
        self.phases
            .iter()
            .fold(Seconds::default(), |total, phase| total + phase.duration)
    }

    /// Validated discretization step.
    pub fn time_step(&self) -> Result<TimeStep> {
        Ok(TimeStep::try_from(self.discretization_step)?)
    }

    /// Build the phase timeline.
    pub fn timeline(&self) -> Result<PhaseTimeline> {
        PhaseTimeline::from_phases(self.phases.iter().map(|p| (p.kind, p.duration.value())))
    }

    /// Validated pendulum parameters, if configured.
    pub fn pendulum_params(&self) -> Option<Result<PendulumParams>> {
        self.pendulum
            .map(|p| PendulumParams::new(p.height, p.gravity))
    }

    /// Build the configured representation with default coefficients.
    ///
    /// # Errors
    ///
    /// Returns an error if the step, timeline or pendulum parameters are
    /// invalid. Run [`validate_config`](super::validate_config) first for
    /// errors that name the motion.
    pub fn build(&self) -> Result<ConfiguredMotion> {
        self.build_named("")
    }

    /// Build with `name` carried into configuration errors.
    pub(crate) fn build_named(&self, name: &str) -> Result<ConfiguredMotion> {
        let step = self.time_step()?;
        let timeline = self.timeline()?;
        let position = Vec2::from(self.initial_position);
        let velocity = Vec2::from(self.initial_velocity);

        let motion: ConfiguredMotion = match self.representation {
            Representation::Spline => {
                SplineComMotion::new(timeline, position, velocity, step)?.into()
            }
            Representation::Pendulum => {
                let params = self.pendulum_params().ok_or_else(|| {
                    let name = heapless::String::try_from(name).unwrap_or_default();
                    ConfigError::MissingPendulum(name)
                })??;
                PendulumComMotion::new(timeline, params, position, velocity, step)?.into()
            }
        };
        Ok(motion)
    }
}

/// Build the configured representation behind a trait object.
#[cfg(feature = "std")]
pub fn build_motion(config: &MotionConfig) -> Result<std::boxed::Box<dyn crate::motion::ComMotion>> {
    Ok(std::boxed::Box::new(config.build()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::motion::ComMotion;

    fn config(representation: Representation) -> MotionConfig {
        let mut phases = Vec::new();
        phases
            .push(PhaseConfig { kind: PhaseType::Stance, duration: Seconds(0.4) })
            .unwrap();
        phases
            .push(PhaseConfig { kind: PhaseType::Step, duration: Seconds(0.6) })
            .unwrap();
        MotionConfig {
            representation,
            discretization_step: Seconds(0.1),
            initial_position: [0.0, 0.0],
            initial_velocity: [0.0, 0.0],
            phases,
            pendulum: None,
        }
    }

    #[test]
    fn test_build_spline() {
        let motion = config(Representation::Spline).build().unwrap();
        assert!(matches!(motion, ConfiguredMotion::Spline(_)));
        assert_eq!(motion.total_free_coeff(), 16);
        assert!((motion.total_time() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_build_pendulum_requires_params() {
        let mut cfg = config(Representation::Pendulum);
        assert!(matches!(
            cfg.build(),
            Err(Error::Config(ConfigError::MissingPendulum(_)))
        ));

        cfg.pendulum = Some(PendulumConfig { height: 0.6, gravity: STANDARD_GRAVITY });
        let motion = cfg.build().unwrap();
        assert_eq!(motion.total_free_coeff(), 4);
    }

    #[test]
    fn test_total_time() {
        assert!((config(Representation::Spline).total_time().value() - 1.0).abs() < 1e-12);
    }
}
