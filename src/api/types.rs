//! Core API data types and structures.
//!
//! This module contains the public data structures produced by the pipeline:
//! - Reconstruction: everything a presentation layer needs after a run
//! - ReconstructionSummary: the same data with decimal strings, ready for JSON

use crate::polynomial::{format_fixed, Polynomial};
use crate::share::{DecodedShare, Point};
use crate::verify::VerificationReport;
use crate::config;
use num_bigint::BigInt;
use num_rational::BigRational;
use serde::{Deserialize, Serialize};

/// The result of one reconstruction run.
///
/// Built once from exactly the first `k` points and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Reconstruction {
    /// Declared total number of shares (`n`)
    pub declared_total: usize,
    /// Threshold used for interpolation (`k`)
    pub threshold: usize,
    /// Decode trace in document order; empty when built from raw points
    pub decoded_shares: Vec<DecodedShare>,
    /// The `k` points that fed interpolation
    pub selected_points: Vec<Point>,
    /// The reconstructed polynomial
    pub polynomial: Polynomial,
    /// Agreement of the polynomial with every known point
    pub report: VerificationReport,
}

impl Reconstruction {
    /// The secret `P(0)`, exact.
    pub fn secret(&self) -> BigRational {
        self.polynomial.constant_term()
    }

    /// The secret as an integer, if it is one.
    pub fn secret_integer(&self) -> Option<BigInt> {
        let secret = self.secret();
        secret.is_integer().then(|| secret.to_integer())
    }

    /// The secret rounded to the nearest integer (half away from zero).
    pub fn secret_rounded(&self) -> BigInt {
        self.secret().round().to_integer()
    }

    /// Whether every known point lies on the reconstructed polynomial.
    pub fn is_consistent(&self) -> bool {
        self.report.all_match
    }

    /// Builds a serialisable view with every big number rendered in decimal.
    pub fn summary(&self) -> ReconstructionSummary {
        ReconstructionSummary {
            n: self.declared_total,
            k: self.threshold,
            shares: self
                .decoded_shares
                .iter()
                .map(|d| ShareSummary {
                    x: d.share.x,
                    base: d.share.base,
                    value: d.share.encoded_value.clone(),
                    decoded: d.point.y.to_string(),
                })
                .collect(),
            selected_points: self
                .selected_points
                .iter()
                .map(|p| PointSummary {
                    x: p.x,
                    y: p.y.to_string(),
                })
                .collect(),
            coefficients: self
                .polynomial
                .coefficients()
                .iter()
                .map(|c| c.to_string())
                .collect(),
            polynomial: self.polynomial.to_string(),
            verification: self
                .report
                .checks
                .iter()
                .map(|c| CheckSummary {
                    x: c.x,
                    evaluated: format_fixed(&c.evaluated, config::DISPLAY_DECIMALS),
                    expected: c.expected.to_string(),
                    matches: c.matches,
                })
                .collect(),
            all_match: self.report.all_match,
            secret: self.secret().to_string(),
        }
    }
}

/// Decode trace entry for one share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareSummary {
    pub x: i64,
    pub base: u32,
    pub value: String,
    pub decoded: String,
}

/// An interpolation point with `y` in decimal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointSummary {
    pub x: i64,
    pub y: String,
}

/// One verification outcome, with the evaluation rounded for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub x: i64,
    pub evaluated: String,
    pub expected: String,
    pub matches: bool,
}

/// Serialisable report of a reconstruction run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconstructionSummary {
    pub n: usize,
    pub k: usize,
    pub shares: Vec<ShareSummary>,
    pub selected_points: Vec<PointSummary>,
    /// Exact coefficients, `p` or `p/q`, ascending degree
    pub coefficients: Vec<String>,
    pub polynomial: String,
    pub verification: Vec<CheckSummary>,
    pub all_match: bool,
    /// Exact secret, `p` or `p/q`
    pub secret: String,
}
