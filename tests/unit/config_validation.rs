//! Unit tests for configuration validation.

use com_motion::config::{validate_config, PlanConfig};
use com_motion::error::{ConfigError, Error};

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let toml_str = r#"
[motions.walk]
discretization_step_s = 0.1
phases = [
  { kind = "stance", duration_s = 0.4 },
  { kind = "step", duration_s = 0.6 },
]
"#;

    let config: PlanConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for a non-positive discretization step.
#[test]
fn test_invalid_discretization_step() {
    let toml_str = r#"
[motions.walk]
discretization_step_s = -0.1
phases = [{ kind = "stance", duration_s = 0.4 }]
"#;

    let config: PlanConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let result = validate_config(&config);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidTimeStep(_)))
    ));
}

/// Test validation fails for a motion without phases.
#[test]
fn test_motion_without_phases() {
    let toml_str = r#"
[motions.idle]
discretization_step_s = 0.1
"#;

    let config: PlanConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    match validate_config(&config) {
        Err(Error::Config(ConfigError::NoPhases(name))) => assert_eq!(name.as_str(), "idle"),
        other => panic!("unexpected result: {:?}", other),
    }
}

/// Test validation fails for a negative phase duration.
#[test]
fn test_negative_phase_duration() {
    let toml_str = r#"
[motions.walk]
discretization_step_s = 0.1
phases = [
  { kind = "stance", duration_s = 0.4 },
  { kind = "step", duration_s = -0.6 },
]
"#;

    let config: PlanConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    match validate_config(&config) {
        Err(Error::Config(ConfigError::InvalidPhaseDuration { motion, duration })) => {
            assert_eq!(motion.as_str(), "walk");
            assert_eq!(duration, -0.6);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

/// Test validation fails for a pendulum motion without parameters.
#[test]
fn test_pendulum_without_section() {
    let toml_str = r#"
[motions.trot]
representation = "pendulum"
discretization_step_s = 0.1
phases = [{ kind = "stance", duration_s = 0.4 }]
"#;

    let config: PlanConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::MissingPendulum(_)))
    ));
}

/// Test validation fails for zero gravity.
#[test]
fn test_pendulum_zero_gravity() {
    let toml_str = r#"
[motions.trot]
representation = "pendulum"
discretization_step_s = 0.1
phases = [{ kind = "stance", duration_s = 0.4 }]

[motions.trot.pendulum]
height_m = 0.5
gravity = 0.0
"#;

    let config: PlanConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidGravity(_)))
    ));
}
