//! Independent check of the zero-hit ratio against statrs' hypergeometric pmf.

use drawodds_core::model::{FULL_DECK, POST_HAND_DECK};
use drawodds_core::ratio::zero_hit_ratio;
use serde::Serialize;
use statrs::distribution::{Discrete, Hypergeometric};
use thiserror::Error;

pub const DEFAULT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("hypergeometric({total}, {targets}, {draws}) rejected: {message}")]
    Distribution {
        total: i64,
        targets: i64,
        draws: i64,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VerificationReport {
    pub checked: usize,
    pub max_abs_error: f64,
    /// `(total, targets, draws)` with the largest error.
    pub worst: Option<(i64, i64, i64)>,
}

impl VerificationReport {
    pub fn within(&self, tolerance: f64) -> bool {
        self.max_abs_error <= tolerance
    }
}

/// Compare every `(targets, draws)` pair for both deck sizes the model uses.
pub fn verify_zero_hit_ratio() -> Result<VerificationReport, VerifyError> {
    let mut report = VerificationReport {
        checked: 0,
        max_abs_error: 0.0,
        worst: None,
    };

    for total in [POST_HAND_DECK, FULL_DECK] {
        for targets in 0..=total {
            for draws in 0..=total {
                let expected = reference_zero_hit(total, targets, draws)?;
                let actual = zero_hit_ratio(total, targets, draws);
                let error = (actual - expected).abs();
                report.checked += 1;
                if error > report.max_abs_error || report.worst.is_none() {
                    report.max_abs_error = report.max_abs_error.max(error);
                    report.worst = Some((total, targets, draws));
                }
            }
        }
    }

    Ok(report)
}

fn reference_zero_hit(total: i64, targets: i64, draws: i64) -> Result<f64, VerifyError> {
    let distribution = Hypergeometric::new(total as u64, targets as u64, draws as u64).map_err(
        |err| VerifyError::Distribution {
            total,
            targets,
            draws,
            message: err.to_string(),
        },
    )?;
    Ok(distribution.pmf(0))
}
