//! Flocking rule toggles.

/// Which of the three flocking rules are active for a tick.
///
/// Passed explicitly to every `step` call so the enable flags are never
/// hidden global state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleSet {
    /// Steer away from predicted collisions.
    pub separation: bool,
    /// Match the heading of similarly directed neighbors.
    pub alignment:  bool,
    /// Steer toward the local group center.
    pub cohesion:   bool,
}

impl RuleSet {
    pub const ALL: RuleSet = RuleSet { separation: true, alignment: true, cohesion: true };
    pub const NONE: RuleSet = RuleSet { separation: false, alignment: false, cohesion: false };

    pub const fn separation_only() -> Self {
        RuleSet { separation: true, ..Self::NONE }
    }

    pub const fn alignment_only() -> Self {
        RuleSet { alignment: true, ..Self::NONE }
    }

    pub const fn cohesion_only() -> Self {
        RuleSet { cohesion: true, ..Self::NONE }
    }

    /// `true` if at least one rule is enabled.
    #[inline]
    pub const fn any(self) -> bool {
        self.separation || self.alignment || self.cohesion
    }
}
