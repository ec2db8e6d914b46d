/// Binomial coefficient `C(n, k)` as a real number.
///
/// Both arguments are floored before use. Non-finite input, `k < 0` and
/// `k > n` all yield 0. The product runs over `min(k, n - k)` factors so every
/// partial value is itself a binomial coefficient and stays exact while it
/// fits in the mantissa.
pub fn combination(n: f64, k: f64) -> f64 {
    if !n.is_finite() || !k.is_finite() {
        return 0.0;
    }

    let n = n.floor();
    let k = k.floor();
    if k < 0.0 || k > n {
        return 0.0;
    }

    let k_eff = k.min(n - k);
    let base = n - k_eff;
    let mut result = 1.0;
    let mut i = 1.0;
    while i <= k_eff {
        result = result * (base + i) / i;
        if !result.is_finite() {
            break;
        }
        i += 1.0;
    }
    result
}
