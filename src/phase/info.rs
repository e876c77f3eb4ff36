//! Phase labels.

/// Support configuration of the robot during one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhaseType {
    /// All relevant limbs in stationary ground contact.
    Stance,
    /// Exactly one limb swinging while the others stand.
    Step,
    /// No limb in contact.
    Flight,
}

impl PhaseType {
    /// Whether this phase advances the step counter.
    #[inline]
    pub fn takes_step(self) -> bool {
        matches!(self, PhaseType::Step | PhaseType::Flight)
    }

    /// Whether at least one limb touches the ground.
    #[inline]
    pub fn has_contact(self) -> bool {
        !matches!(self, PhaseType::Flight)
    }
}

/// Label of one segment of the motion timeline.
///
/// For step and flight phases `id` is the zero-based index of that step. For
/// a stance phase it is the index of the last completed step, so the stance
/// before any step has id `-1`. Footholds are paired with phases by `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseInfo {
    /// Support configuration.
    pub kind: PhaseType,
    /// Step index, see type docs.
    pub id: i32,
}

impl PhaseInfo {
    /// Create a phase label.
    #[inline]
    pub const fn new(kind: PhaseType, id: i32) -> Self {
        Self { kind, id }
    }

    /// The stance phase before any step was taken.
    #[inline]
    pub const fn initial_stance() -> Self {
        Self::new(PhaseType::Stance, -1)
    }

    /// Stance phase after step `id` completed.
    #[inline]
    pub const fn stance(id: i32) -> Self {
        Self::new(PhaseType::Stance, id)
    }

    /// Swing phase of step `id`.
    #[inline]
    pub const fn step(id: i32) -> Self {
        Self::new(PhaseType::Step, id)
    }

    /// Flight phase of step `id`.
    #[inline]
    pub const fn flight(id: i32) -> Self {
        Self::new(PhaseType::Flight, id)
    }

    /// Check if this is a stance phase.
    #[inline]
    pub fn is_stance(&self) -> bool {
        self.kind == PhaseType::Stance
    }

    /// Check if this is a step phase.
    #[inline]
    pub fn is_step(&self) -> bool {
        self.kind == PhaseType::Step
    }

    /// Check if this is a flight phase.
    #[inline]
    pub fn is_flight(&self) -> bool {
        self.kind == PhaseType::Flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        assert_eq!(PhaseInfo::step(2), PhaseInfo::new(PhaseType::Step, 2));
        assert_ne!(PhaseInfo::step(2), PhaseInfo::flight(2));
        assert_ne!(PhaseInfo::stance(0), PhaseInfo::stance(1));
        assert_eq!(PhaseInfo::initial_stance(), PhaseInfo::stance(-1));
    }

    #[test]
    fn test_kind_predicates() {
        assert!(PhaseType::Step.takes_step());
        assert!(PhaseType::Flight.takes_step());
        assert!(!PhaseType::Stance.takes_step());
        assert!(!PhaseType::Flight.has_contact());
        assert!(PhaseInfo::flight(0).is_flight());
        assert!(PhaseInfo::initial_stance().is_stance());
    }
}
