//! Combinatorial ratios computed as running products.
//!
//! - `combination`: binomial coefficients over the smaller side of the symmetry.
//! - `zero_hit`: hypergeometric probability of drawing no targets at all.

mod combination;
mod zero_hit;

pub use combination::combination;
pub use zero_hit::zero_hit_ratio;
