use core::fmt;
use serde::{Deserialize, Serialize};

use super::deck::{FULL_DECK, OPENING_HAND};
use super::policy::KeepMode;
use super::probability::{
    keep_miss, missed_opening_miss, no_keep_miss, probability_after_missed_opening,
    probability_at_least_one,
};

/// The two callable shapes of the model.
///
/// `General` answers the unconditional question for either policy.
/// `MissedOpening` assumes the opening hand already missed and only models
/// the mulligan and later draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "variant", content = "policy", rename_all = "snake_case")]
pub enum ModelVariant {
    General(KeepMode),
    MissedOpening,
}

impl ModelVariant {
    pub const fn as_str(self) -> &'static str {
        match self {
            ModelVariant::General(_) => "general",
            ModelVariant::MissedOpening => "missed_opening",
        }
    }

    pub const fn policy(self) -> KeepMode {
        match self {
            ModelVariant::General(policy) => policy,
            ModelVariant::MissedOpening => KeepMode::Keep,
        }
    }

    /// Largest mulligan count the variant accepts.
    pub const fn mulligan_cap(self) -> i64 {
        match self {
            ModelVariant::General(_) => FULL_DECK,
            ModelVariant::MissedOpening => OPENING_HAND,
        }
    }

    pub fn probability(self, targets: i64, mulligans: i64, later_draws: i64) -> f64 {
        match self {
            ModelVariant::General(policy) => {
                probability_at_least_one(policy, targets, mulligans, later_draws)
            }
            ModelVariant::MissedOpening => {
                probability_after_missed_opening(targets, mulligans, later_draws)
            }
        }
    }

    pub fn miss(self, targets: i64, mulligans: i64, later_draws: i64) -> f64 {
        match self {
            ModelVariant::General(KeepMode::Keep) => keep_miss(targets, mulligans, later_draws),
            ModelVariant::General(KeepMode::NoKeep) => {
                no_keep_miss(targets, mulligans, later_draws)
            }
            ModelVariant::MissedOpening => missed_opening_miss(targets, mulligans, later_draws),
        }
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelVariant::General(policy) => write!(f, "general/{policy}"),
            ModelVariant::MissedOpening => f.write_str("missed_opening/keep"),
        }
    }
}
