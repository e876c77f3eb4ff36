//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::PlanConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```rust,ignore
/// use com_motion::load_config;
///
/// let config = load_config("plan.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PlanConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<PlanConfig> {
    let config: PlanConfig = toml::from_str(content).map_err(|e| {
        let msg = heapless::String::try_from(e.message()).unwrap_or_default();
        Error::Config(ConfigError::ParseError(msg))
    })?;

    // Validate the configuration
    super::validation::validate_config(&config)?;

    debug!("loaded plan with {} motions", config.motions.len());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Representation;
    use crate::phase::PhaseType;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[motions.stand]
discretization_step_s = 0.1
phases = [{ kind = "stance", duration_s = 1.0 }]
"#;

        let config = parse_config(toml).unwrap();
        let stand = config.motion("stand").unwrap();
        assert_eq!(stand.representation, Representation::Spline);
        assert_eq!(stand.initial_position, [0.0, 0.0]);
        assert_eq!(stand.phases[0].kind, PhaseType::Stance);
    }

    #[test]
    fn test_parse_pendulum_config() {
        let toml = r#"
[motions.trot]
representation = "pendulum"
discretization_step_s = 0.05
initial_position = [0.0, 0.02]
phases = [
  { kind = "stance", duration_s = 0.2 },
  { kind = "step", duration_s = 0.3 },
  { kind = "flight", duration_s = 0.1 },
]

[motions.trot.pendulum]
height_m = 0.58
"#;

        let config = parse_config(toml).unwrap();
        let trot = config.motion("trot").unwrap();
        assert_eq!(trot.representation, Representation::Pendulum);
        let pendulum = trot.pendulum.unwrap();
        assert!((pendulum.gravity - 9.81).abs() < 1e-12);
        assert_eq!(trot.phases.len(), 3);
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        let toml = r#"
[motions.hop]
discretization_step_s = 0.1
phases = [{ kind = "hop", duration_s = 1.0 }]
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn test_parse_validates() {
        let toml = r#"
[motions.empty]
discretization_step_s = 0.1
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::NoPhases(_)))
        ));
    }
}
