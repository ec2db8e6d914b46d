//! Closed-form "at least one target" probabilities.
//!
//! Every operation clamps its input, composes zero-hit ratios and returns
//! `1 - P(miss)` clamped to `[0, 1]`. The `*_miss` companions expose the
//! unclamped miss probability for cross-checks between policies.

use super::deck::{FULL_DECK, OPENING_HAND, POST_HAND_DECK};
use super::params::DrawParams;
use super::policy::KeepMode;
use crate::ratio::{combination, zero_hit_ratio};

/// Probability of seeing at least one of `targets` copies once the opening
/// hand, `mulligans` replacement draws and `later_draws` further draws are done.
pub fn probability_at_least_one(
    policy: KeepMode,
    targets: i64,
    mulligans: i64,
    later_draws: i64,
) -> f64 {
    match policy {
        KeepMode::Keep => keep_probability(targets, mulligans, later_draws),
        KeepMode::NoKeep => no_keep_probability(targets, mulligans, later_draws),
    }
}

pub fn keep_probability(targets: i64, mulligans: i64, later_draws: i64) -> f64 {
    hit_from_miss(keep_miss(targets, mulligans, later_draws))
}

/// Opening hand from 40 cards, then mulligan and later draws each from the 36
/// left behind. The three stages are multiplied as independent misses.
pub fn keep_miss(targets: i64, mulligans: i64, later_draws: i64) -> f64 {
    let params = DrawParams::general(targets, mulligans, later_draws);
    zero_hit_ratio(FULL_DECK, params.targets, OPENING_HAND)
        * zero_hit_ratio(POST_HAND_DECK, params.targets, params.mulligans)
        * zero_hit_ratio(POST_HAND_DECK, params.targets, params.later_draws)
}

pub fn no_keep_probability(targets: i64, mulligans: i64, later_draws: i64) -> f64 {
    hit_from_miss(no_keep_miss(targets, mulligans, later_draws))
}

/// The opening hand goes back, so the mulligan draw sees a `36 + l` card
/// universe. Conditions on `k` targets landing among the `l` mulligan cards.
pub fn no_keep_miss(targets: i64, mulligans: i64, later_draws: i64) -> f64 {
    let DrawParams {
        targets,
        mulligans,
        later_draws,
    } = DrawParams::general(targets, mulligans, later_draws);

    let later_miss = zero_hit_ratio(POST_HAND_DECK, targets, later_draws);

    let universe = POST_HAND_DECK + mulligans;
    let arrangements = combination(universe as f64, mulligans as f64);
    let mulligan_miss: f64 = (0..=mulligans.min(targets))
        .map(|k| {
            let placed = if arrangements == 0.0 {
                0.0
            } else {
                combination(targets as f64, k as f64)
                    * combination((universe - targets) as f64, (mulligans - k) as f64)
                    / arrangements
            };
            placed * zero_hit_ratio(POST_HAND_DECK, targets - k, mulligans)
        })
        .sum();

    later_miss * mulligan_miss
}

/// Keep-only model for callers that already know the opening hand missed:
/// no opening-hand factor, and at most four mulligan draws.
pub fn probability_after_missed_opening(targets: i64, mulligans: i64, later_draws: i64) -> f64 {
    hit_from_miss(missed_opening_miss(targets, mulligans, later_draws))
}

pub fn missed_opening_miss(targets: i64, mulligans: i64, later_draws: i64) -> f64 {
    let params = DrawParams::restricted(targets, mulligans, later_draws);
    zero_hit_ratio(POST_HAND_DECK, params.targets, params.mulligans)
        * zero_hit_ratio(POST_HAND_DECK, params.targets, params.later_draws)
}

fn hit_from_miss(miss: f64) -> f64 {
    (1.0 - miss).clamp(0.0, 1.0)
}
