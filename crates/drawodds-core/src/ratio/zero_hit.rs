/// Probability that `draws` cards taken without replacement from a deck of
/// `total` cards, `target_in_deck` of which are targets, contain no target.
///
/// Equal to `C(total - target_in_deck, draws) / C(total, draws)` but built as
/// one running product of `(non_targets - i) / (total - i)`.
///
/// Degenerate input resolves in this order: no draws, no targets or an empty
/// deck miss with certainty (1); more draws than cards, or more targets than
/// cards, can never miss (0).
pub fn zero_hit_ratio(total: i64, target_in_deck: i64, draws: i64) -> f64 {
    if draws <= 0 || target_in_deck <= 0 || total <= 0 {
        return 1.0;
    }
    if draws > total {
        return 0.0;
    }

    let non_targets = total - target_in_deck;
    if non_targets < 0 {
        return 0.0;
    }

    let mut ratio = 1.0;
    for i in 0..draws {
        let numerator = non_targets - i;
        if numerator <= 0 {
            // out of non-targets: the remaining draws must hit
            return 0.0;
        }
        ratio *= numerator as f64 / (total - i) as f64;
    }
    ratio
}

#[cfg(test)]
mod tests {
    use super::zero_hit_ratio;
    use crate::ratio::combination;

    const EPS: f64 = 1e-12;

    #[test]
    fn opening_hand_with_three_targets() {
        let expected = 37.0 * 36.0 * 35.0 * 34.0 / (40.0 * 39.0 * 38.0 * 37.0);
        assert!((zero_hit_ratio(40, 3, 4) - expected).abs() < EPS);
    }

    #[test]
    fn matches_combination_quotient() {
        for total in [36_i64, 40] {
            for targets in 0..=total {
                for draws in 0..=total {
                    let quotient = combination((total - targets) as f64, draws as f64)
                        / combination(total as f64, draws as f64);
                    let ratio = zero_hit_ratio(total, targets, draws);
                    assert!(
                        (ratio - quotient).abs() < 1e-9,
                        "total={total} targets={targets} draws={draws}: {ratio} vs {quotient}"
                    );
                }
            }
        }
    }

    #[test]
    fn no_targets_or_no_draws_always_miss() {
        for total in 0..=40 {
            for n in 0..=40 {
                assert_eq!(zero_hit_ratio(total, 0, n), 1.0);
                assert_eq!(zero_hit_ratio(total, n, 0), 1.0);
            }
        }
    }

    #[test]
    fn too_few_non_targets_always_hits() {
        for total in 1..=40_i64 {
            for targets in 1..=total {
                for draws in (total - targets + 1)..=total {
                    assert_eq!(zero_hit_ratio(total, targets, draws), 0.0);
                }
            }
        }
    }

    #[test]
    fn degenerate_inputs_follow_priority() {
        assert_eq!(zero_hit_ratio(40, 3, -2), 1.0);
        assert_eq!(zero_hit_ratio(40, -3, 5), 1.0);
        assert_eq!(zero_hit_ratio(0, 3, 5), 1.0);
        assert_eq!(zero_hit_ratio(-1, 3, 5), 1.0);
        assert_eq!(zero_hit_ratio(36, 3, 37), 0.0);
        assert_eq!(zero_hit_ratio(36, 40, 1), 0.0);
        // targets checked before the oversized draw
        assert_eq!(zero_hit_ratio(36, 0, 37), 1.0);
    }

    #[test]
    fn stays_within_unit_interval() {
        for total in -2..=42_i64 {
            for targets in -2..=42 {
                for draws in -2..=42 {
                    let ratio = zero_hit_ratio(total, targets, draws);
                    assert!((0.0..=1.0).contains(&ratio));
                }
            }
        }
    }
}
