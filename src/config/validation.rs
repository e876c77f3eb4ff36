//! Configuration validation.

use heapless::String;

use crate::error::{ConfigError, Error, Result};
use crate::motion::PendulumParams;

use super::motion::{MotionConfig, Representation};
use super::units::TimeStep;
use super::PlanConfig;

/// Validate a plan configuration.
///
/// Checks:
/// - Discretization steps are finite and positive
/// - Every motion has at least one phase, all with positive durations
/// - Initial states are finite
/// - Pendulum motions carry valid pendulum parameters
pub fn validate_config(config: &PlanConfig) -> Result<()> {
    for (name, motion) in config.motions.iter() {
        validate_motion(name.as_str(), motion)?;
    }

    Ok(())
}

fn validate_motion(name: &str, config: &MotionConfig) -> Result<()> {
    let motion_name = || String::try_from(name).unwrap_or_default();

    TimeStep::try_from(config.discretization_step)?;

    if config.phases.is_empty() {
        return Err(Error::Config(ConfigError::NoPhases(motion_name())));
    }

    if let Some(phase) = config.phases.iter().find(|p| !p.duration.is_positive()) {
        return Err(Error::Config(ConfigError::InvalidPhaseDuration {
            motion: motion_name(),
            duration: phase.duration.value(),
        }));
    }

    let finite = config
        .initial_position
        .iter()
        .chain(config.initial_velocity.iter())
        .all(|v| v.is_finite());
    if !finite {
        return Err(Error::Config(ConfigError::NonFiniteInitialState(motion_name())));
    }

    // Pendulum section is only checked when it is used
    if config.representation == Representation::Pendulum {
        let pendulum = config
            .pendulum
            .ok_or_else(|| Error::Config(ConfigError::MissingPendulum(motion_name())))?;
        PendulumParams::new(pendulum.height, pendulum.gravity)?;
    }

    Ok(())
}
