use drawodds_core::model::{
    FULL_DECK, KeepMode, ModelVariant, OPENING_HAND, POST_HAND_DECK, keep_miss, missed_opening_miss,
    no_keep_probability, probability_after_missed_opening, probability_at_least_one,
};
use drawodds_core::ratio::{combination, zero_hit_ratio};

const VARIANTS: [ModelVariant; 3] = [
    ModelVariant::General(KeepMode::Keep),
    ModelVariant::General(KeepMode::NoKeep),
    ModelVariant::MissedOpening,
];

fn sweep(variant: ModelVariant) -> impl Iterator<Item = (i64, i64, i64)> {
    let cap = variant.mulligan_cap();
    (0..=FULL_DECK).flat_map(move |n| {
        (0..=cap).flat_map(move |l| (0..=FULL_DECK).map(move |m| (n, l, m)))
    })
}

#[test]
fn every_result_is_a_probability() {
    for variant in VARIANTS {
        for (n, l, m) in sweep(variant) {
            let p = variant.probability(n, l, m);
            assert!(
                (0.0..=1.0).contains(&p),
                "{variant} n={n} l={l} m={m}: {p}"
            );
        }
    }
}

#[test]
fn identical_inputs_give_identical_outputs() {
    for variant in VARIANTS {
        for (n, l, m) in sweep(variant).step_by(97) {
            assert_eq!(
                variant.probability(n, l, m).to_bits(),
                variant.probability(n, l, m).to_bits()
            );
        }
    }
}

#[test]
fn more_later_draws_never_hurt() {
    for variant in VARIANTS {
        for (n, l, m) in sweep(variant).filter(|(_, _, m)| *m < FULL_DECK) {
            let before = variant.probability(n, l, m);
            let after = variant.probability(n, l, m + 1);
            assert!(after >= before - 1e-12, "{variant} n={n} l={l} m={m}");
        }
    }
}

#[test]
fn more_targets_never_hurt() {
    for variant in VARIANTS {
        for (n, l, m) in sweep(variant).filter(|(n, _, _)| *n < FULL_DECK) {
            let before = variant.probability(n, l, m);
            let after = variant.probability(n + 1, l, m);
            assert!(after >= before - 1e-12, "{variant} n={n} l={l} m={m}");
        }
    }
}

#[test]
fn more_mulligans_never_hurt_while_they_fit_the_deck() {
    for variant in VARIANTS {
        // past 36 mulligan cards the reshuffle formula degenerates
        let limit = variant.mulligan_cap().min(POST_HAND_DECK);
        for (n, l, m) in sweep(variant).filter(|(_, l, _)| *l < limit) {
            let before = variant.probability(n, l, m);
            let after = variant.probability(n, l + 1, m);
            assert!(after >= before - 1e-12, "{variant} n={n} l={l} m={m}");
        }
    }
}

#[test]
fn keep_policy_is_monotone_in_mulligans_over_the_whole_domain() {
    for n in 0..=FULL_DECK {
        for l in 0..FULL_DECK {
            for m in 0..=FULL_DECK {
                assert!(
                    probability_at_least_one(KeepMode::Keep, n, l + 1, m)
                        >= probability_at_least_one(KeepMode::Keep, n, l, m) - 1e-12
                );
            }
        }
    }
}

#[test]
fn opening_hand_probability_for_three_copies() {
    let p = probability_at_least_one(KeepMode::Keep, 3, 0, 0);
    assert!((p - (1.0 - zero_hit_ratio(FULL_DECK, 3, OPENING_HAND))).abs() < 1e-12);
    assert!((p - 0.277_327_935_222_671_96).abs() < 1e-12);
    assert!((p * 100.0 - 27.75).abs() < 0.05);
}

#[test]
fn reshuffle_without_mulligan_matches_later_draw_term() {
    // past 36 targets the reshuffle universe has a negative non-target count
    for n in 0..=POST_HAND_DECK {
        for m in 0..=FULL_DECK {
            let no_keep = no_keep_probability(n, 0, m);
            let later = probability_after_missed_opening(n, 0, m);
            assert!((no_keep - later).abs() < 1e-12, "n={n} m={m}");
        }
    }
}

#[test]
fn restricted_miss_is_general_miss_without_opening_hand() {
    for n in 0..=FULL_DECK {
        let opening = zero_hit_ratio(FULL_DECK, n, OPENING_HAND);
        if opening == 0.0 {
            continue;
        }
        for l in 0..=OPENING_HAND {
            for m in 0..=FULL_DECK {
                let expected = keep_miss(n, l, m) / opening;
                let actual = missed_opening_miss(n, l, m);
                assert!((actual - expected).abs() < 1e-12, "n={n} l={l} m={m}");
            }
        }
    }
}

#[test]
fn combination_laws_hold_for_deck_sizes() {
    for n in 0..=2 * FULL_DECK {
        let nf = n as f64;
        assert_eq!(combination(nf, 0.0), 1.0);
        assert_eq!(combination(nf, nf), 1.0);
        for k in 0..=n {
            let kf = k as f64;
            assert_eq!(combination(nf, kf), combination(nf, nf - kf));
        }
    }
}
