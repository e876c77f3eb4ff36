//! Unit tests for TOML configuration parsing.

use com_motion::config::{load_config, PlanConfig, Representation};
use com_motion::phase::PhaseType;

/// Test parsing a spline motion straight from TOML.
#[test]
fn test_parse_spline_motion() {
    let toml_str = r#"
[motions.walk]
representation = "spline"
discretization_step_s = 0.1
initial_position = [0.0, 0.1]
initial_velocity = [0.25, 0.0]
phases = [
  { kind = "stance", duration_s = 0.4 },
  { kind = "step", duration_s = 0.6 },
]
"#;

    let config: PlanConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let walk = config.motion("walk").expect("Motion not found");

    assert_eq!(walk.representation, Representation::Spline);
    assert_eq!(walk.discretization_step.value(), 0.1);
    assert_eq!(walk.initial_position, [0.0, 0.1]);
    assert_eq!(walk.initial_velocity, [0.25, 0.0]);
    assert_eq!(walk.phases.len(), 2);
    assert_eq!(walk.phases[1].kind, PhaseType::Step);
    assert_eq!(walk.phases[1].duration.value(), 0.6);
    assert!(walk.pendulum.is_none());
}

/// Test that the pendulum section and its gravity default parse.
#[test]
fn test_parse_pendulum_section() {
    let toml_str = r#"
[motions.jump]
representation = "pendulum"
discretization_step_s = 0.02
phases = [
  { kind = "stance", duration_s = 0.3 },
  { kind = "flight", duration_s = 0.15 },
  { kind = "stance", duration_s = 0.3 },
]

[motions.jump.pendulum]
height_m = 0.5
gravity = 1.62
"#;

    let config: PlanConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let jump = config.motion("jump").expect("Motion not found");
    let pendulum = jump.pendulum.expect("Pendulum section missing");

    assert_eq!(jump.representation, Representation::Pendulum);
    assert_eq!(pendulum.height, 0.5);
    assert_eq!(pendulum.gravity, 1.62);
}

/// Test listing several motions.
#[test]
fn test_multiple_motions() {
    let toml_str = r#"
[motions.a]
discretization_step_s = 0.1
phases = [{ kind = "stance", duration_s = 1.0 }]

[motions.b]
discretization_step_s = 0.1
phases = [{ kind = "step", duration_s = 1.0 }]
"#;

    let config: PlanConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let names: Vec<&str> = config.motion_names().collect();
    assert_eq!(names, vec!["a", "b"]);
    assert!(config.motion("c").is_none());
}

/// Test loading from a file on disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join(format!("com_motion_plan_{}.toml", std::process::id()));
    std::fs::write(
        &path,
        r#"
[motions.stand]
discretization_step_s = 0.5
phases = [{ kind = "stance", duration_s = 2.0 }]
"#,
    )
    .expect("Failed to write config");

    let config = load_config(&path);
    let _ = std::fs::remove_file(&path);

    let config = config.expect("Failed to load config");
    assert!(config.motion("stand").is_some());
}

/// Test that a missing file is reported as an I/O error.
#[test]
fn test_load_missing_file() {
    let result = load_config("/nonexistent/com_motion/plan.toml");
    assert!(matches!(
        result,
        Err(com_motion::Error::Config(com_motion::error::ConfigError::IoError(_)))
    ));
}
