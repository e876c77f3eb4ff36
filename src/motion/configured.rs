//! Static dispatch over the built-in representations.

use crate::config::units::TimeStep;
use crate::error::Result;
use crate::phase::{PhaseInfo, PhaseSequence};

use super::com_motion::{ComMotion, Coefficients};
use super::pendulum::PendulumComMotion;
use super::spline::SplineComMotion;
use super::state::ComState;

/// Either built-in representation, chosen at runtime from configuration.
///
/// Usable without an allocator; box it when a `dyn ComMotion` is needed.
#[derive(Debug, Clone)]
pub enum ConfiguredMotion {
    /// Piecewise quintic spline.
    Spline(SplineComMotion),
    /// Linear inverted pendulum.
    Pendulum(PendulumComMotion),
}

impl ConfiguredMotion {
    fn inner(&self) -> &dyn ComMotion {
        match self {
            ConfiguredMotion::Spline(m) => m,
            ConfiguredMotion::Pendulum(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ComMotion {
        match self {
            ConfiguredMotion::Spline(m) => m,
            ConfiguredMotion::Pendulum(m) => m,
        }
    }
}

impl ComMotion for ConfiguredMotion {
    fn com(&self, t_global: f64) -> Result<ComState> {
        self.inner().com(t_global)
    }

    fn set_coefficients(&mut self, coeff: &[f64]) -> Result<()> {
        self.inner_mut().set_coefficients(coeff)
    }

    fn total_free_coeff(&self) -> usize {
        self.inner().total_free_coeff()
    }

    fn coefficients(&self) -> Coefficients {
        self.inner().coefficients()
    }

    fn total_time(&self) -> f64 {
        self.inner().total_time()
    }

    fn current_phase(&self, t_global: f64) -> Result<PhaseInfo> {
        self.inner().current_phase(t_global)
    }

    fn phases(&self) -> PhaseSequence {
        self.inner().phases()
    }

    fn set_end_at_start(&mut self) -> Result<()> {
        self.inner_mut().set_end_at_start()
    }

    fn discretization_step(&self) -> TimeStep {
        self.inner().discretization_step()
    }
}

impl From<SplineComMotion> for ConfiguredMotion {
    fn from(motion: SplineComMotion) -> Self {
        ConfiguredMotion::Spline(motion)
    }
}

impl From<PendulumComMotion> for ConfiguredMotion {
    fn from(motion: PendulumComMotion) -> Self {
        ConfiguredMotion::Pendulum(motion)
    }
}
