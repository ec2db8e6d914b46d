//! Seeded shuffles of a 40-card deck, used to check the ratio engine
//! against observed draws.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::model::{Deck, FULL_DECK};

/// Fraction of `trials` shuffles whose top `draws` cards hold a target.
///
/// Converges to `1 - zero_hit_ratio(40, targets, draws)`. Counts are clamped
/// to the deck; zero trials yield 0.
pub fn estimate_hit_rate(targets: i64, draws: i64, trials: u32, seed: u64) -> f64 {
    if trials == 0 {
        return 0.0;
    }

    let draws = draws.clamp(0, FULL_DECK) as usize;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut deck = Deck::with_targets(targets);
    let mut hits = 0u32;
    for _ in 0..trials {
        deck.shuffle_in_place(&mut rng);
        if deck.hits_within(draws) {
            hits += 1;
        }
    }
    hits as f64 / trials as f64
}
