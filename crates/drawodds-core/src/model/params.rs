use serde::{Deserialize, Serialize};

use super::deck::FULL_DECK;
use super::variant::ModelVariant;

/// Target, mulligan and later-draw counts after clamping to a model's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawParams {
    pub targets: i64,
    pub mulligans: i64,
    pub later_draws: i64,
}

impl DrawParams {
    /// Clamp `n`, `l` and `m` to `[0, 40]`.
    pub fn general(targets: i64, mulligans: i64, later_draws: i64) -> Self {
        Self::clamped(
            ModelVariant::General(Default::default()),
            targets,
            mulligans,
            later_draws,
        )
    }

    /// Clamp `n` and `m` to `[0, 40]` and `l` to the opening hand size.
    pub fn restricted(targets: i64, mulligans: i64, later_draws: i64) -> Self {
        Self::clamped(ModelVariant::MissedOpening, targets, mulligans, later_draws)
    }

    pub fn clamped(variant: ModelVariant, targets: i64, mulligans: i64, later_draws: i64) -> Self {
        Self {
            targets: targets.clamp(0, FULL_DECK),
            mulligans: mulligans.clamp(0, variant.mulligan_cap()),
            later_draws: later_draws.clamp(0, FULL_DECK),
        }
    }

    /// Floor real-valued input (e.g. slider positions) and clamp it.
    ///
    /// NaN maps to 0; infinities map to the nearest bound.
    pub fn from_real(variant: ModelVariant, targets: f64, mulligans: f64, later_draws: f64) -> Self {
        Self {
            targets: floor_clamped(targets, FULL_DECK),
            mulligans: floor_clamped(mulligans, variant.mulligan_cap()),
            later_draws: floor_clamped(later_draws, FULL_DECK),
        }
    }
}

fn floor_clamped(value: f64, max: i64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    value.floor().clamp(0.0, max as f64) as i64
}
