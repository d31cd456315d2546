//! Consistency check of a reconstructed polynomial against every known point.
//!
//! Verification is diagnostic: a mismatch downgrades confidence in the
//! recovered secret but never blocks it.

use crate::polynomial::Polynomial;
use crate::share::Point;
use crate::config;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Signed;
use tracing::{debug_span, warn};

/// Outcome of evaluating the polynomial at one known point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointCheck {
    pub x: i64,
    /// `P(x)`
    pub evaluated: BigRational,
    /// The point's decoded `y`
    pub expected: BigInt,
    pub matches: bool,
}

/// Per-point results plus the global verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    pub checks: Vec<PointCheck>,
    /// True only when every point agrees within tolerance
    pub all_match: bool,
}

impl VerificationReport {
    /// Points whose evaluation disagreed with their decoded value
    pub fn mismatches(&self) -> impl Iterator<Item = &PointCheck> {
        self.checks.iter().filter(|c| !c.matches)
    }
}

/// The absolute tolerance used for the pass/fail verdict.
pub fn tolerance() -> BigRational {
    BigRational::new(
        BigInt::from(1u32),
        BigInt::from(config::VERIFY_TOLERANCE_DENOMINATOR),
    )
}

/// Evaluates `polynomial` at each point's `x` and compares against its `y`.
pub fn verify(polynomial: &Polynomial, points: &[Point]) -> VerificationReport {
    let _span = debug_span!("verify", points = points.len()).entered();
    let tolerance = tolerance();

    let checks: Vec<PointCheck> = points
        .iter()
        .map(|point| {
            let evaluated = polynomial.evaluate_at(point.x);
            let diff = &evaluated - BigRational::from_integer(point.y.clone());
            let matches = diff.abs() <= tolerance;
            PointCheck {
                x: point.x,
                evaluated,
                expected: point.y.clone(),
                matches,
            }
        })
        .collect();

    let all_match = checks.iter().all(|c| c.matches);
    if !all_match {
        let bad: Vec<i64> = checks.iter().filter(|c| !c.matches).map(|c| c.x).collect();
        warn!(
            mismatched = ?bad,
            "reconstructed polynomial disagrees with some shares; they may be corrupted"
        );
    }

    VerificationReport { checks, all_match }
}
