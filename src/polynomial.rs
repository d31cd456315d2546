//! Lagrange interpolation over exact rationals.
//!
//! Coefficients are produced, not just evaluations, so each basis polynomial
//! `L_i(x) = Π_{j≠i} (x - x_j)` is built explicitly by repeated multiplication
//! with linear factors. Numerators stay integral; the per-point scale
//! `y_i / D_i` with `D_i = Π_{j≠i} (x_i - x_j)` is an exact [`BigRational`],
//! so large secrets reconstruct without precision loss.

use crate::share::{ensure_distinct_x, Point};
use crate::{Result, ShareRecoveryError};
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;
use tracing::{debug, debug_span};

/// A polynomial `a0 + a1*x + a2*x^2 + ...` with exact rational coefficients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    coefficients: Vec<BigRational>,
}

impl Polynomial {
    /// Builds a polynomial from coefficients in ascending degree order.
    pub fn new(coefficients: Vec<BigRational>) -> Self {
        Self { coefficients }
    }

    /// Builds a polynomial with integer coefficients.
    pub fn from_integers<I, T>(coefficients: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<BigInt>,
    {
        Self::new(
            coefficients
                .into_iter()
                .map(|c| BigRational::from_integer(c.into()))
                .collect(),
        )
    }

    /// Coefficients indexed by degree
    pub fn coefficients(&self) -> &[BigRational] {
        &self.coefficients
    }

    /// Nominal degree (`len - 1`), zero for an empty polynomial.
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// The constant term, which is the value at `x = 0`.
    pub fn constant_term(&self) -> BigRational {
        self.coefficients.first().cloned().unwrap_or_else(BigRational::zero)
    }

    /// Evaluates the polynomial at `x` using Horner's rule.
    pub fn evaluate(&self, x: &BigInt) -> BigRational {
        let x = BigRational::from_integer(x.clone());
        self.coefficients
            .iter()
            .rev()
            .fold(BigRational::zero(), |acc, coeff| acc * &x + coeff)
    }

    /// Evaluates the polynomial at an integer share index.
    pub fn evaluate_at(&self, x: i64) -> BigRational {
        self.evaluate(&BigInt::from(x))
    }
}

/// Multiplies an integer polynomial by the linear factor `(x - root)`.
///
/// Shift-and-subtract: the coefficient at degree `d + 1` gains `poly[d]`
/// and the coefficient at degree `d` loses `poly[d] * root`.
pub fn multiply_by_linear(poly: &[BigInt], root: &BigInt) -> Vec<BigInt> {
    let mut result = vec![BigInt::zero(); poly.len() + 1];
    for (d, coeff) in poly.iter().enumerate() {
        result[d] -= coeff * root;
        result[d + 1] += coeff;
    }
    result
}

/// Reconstructs the unique degree `k - 1` polynomial through the first `k` points.
///
/// # Errors
///
/// - `InvalidThreshold` if `k` is zero
/// - `InsufficientShares` if fewer than `k` points are supplied
/// - `IllFormedPointSet` if two of the selected points share an x coordinate
///
/// # Example
///
/// ```rust
/// use kontor_shamir::polynomial::interpolate;
/// use kontor_shamir::Point;
/// use num_bigint::BigInt;
/// use num_rational::BigRational;
///
/// let points = [Point::new(1, 4), Point::new(2, 7), Point::new(3, 12)];
/// let poly = interpolate(&points, 3)?;
/// assert_eq!(poly.constant_term(), BigRational::from_integer(BigInt::from(3)));
/// assert_eq!(poly.evaluate_at(6), BigRational::from_integer(BigInt::from(39)));
/// # Ok::<(), kontor_shamir::ShareRecoveryError>(())
/// ```
pub fn interpolate(points: &[Point], k: usize) -> Result<Polynomial> {
    let _span = debug_span!("interpolate", k, available = points.len()).entered();

    if k == 0 {
        return Err(ShareRecoveryError::InvalidThreshold {
            field: crate::config::FIELD_K.to_string(),
            value: k.to_string(),
        });
    }
    if points.len() < k {
        return Err(ShareRecoveryError::InsufficientShares {
            have: points.len(),
            need: k,
        });
    }

    let selected = &points[..k];
    ensure_distinct_x(selected)?;

    let xs: Vec<BigInt> = selected.iter().map(|p| BigInt::from(p.x)).collect();
    let mut coefficients = vec![BigRational::zero(); k];

    for (i, point) in selected.iter().enumerate() {
        let xi = &xs[i];
        let mut basis = vec![BigInt::one()];
        let mut denominator = BigInt::one();

        for (j, xj) in xs.iter().enumerate() {
            if j == i {
                continue;
            }
            basis = multiply_by_linear(&basis, xj);
            denominator *= xi - xj;
        }

        let scale = BigRational::new(point.y.clone(), denominator);
        for (coeff, b) in coefficients.iter_mut().zip(&basis) {
            *coeff += &scale * BigRational::from_integer(b.clone());
        }
    }

    debug!(degree = k - 1, "interpolated polynomial");
    Ok(Polynomial::new(coefficients))
}

/// Evaluates `polynomial` at `x`.
pub fn evaluate(polynomial: &Polynomial, x: &BigInt) -> BigRational {
    polynomial.evaluate(x)
}

/// Renders a rational as a fixed-point decimal rounded half away from zero.
///
/// Works on the exact value, so `format_fixed(&(39/1), 2)` is `"39.00"` for
/// any magnitude.
pub fn format_fixed(value: &BigRational, places: usize) -> String {
    let scale = BigInt::from(10u32).pow(places as u32);
    let scaled = (value * BigRational::from_integer(scale.clone())).round();
    let digits = scaled.to_integer();

    let negative = digits.is_negative();
    let (whole, frac) = digits.abs().div_rem(&scale);
    let sign = if negative { "-" } else { "" };
    if places == 0 {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{:0>width$}", frac.to_string(), width = places)
    }
}

/// Renders a coefficient as an integer when integral, otherwise `p/q`.
fn format_coefficient(value: &BigRational) -> String {
    if value.is_integer() {
        value.to_integer().to_string()
    } else {
        format!("{}/{}", value.numer(), value.denom())
    }
}

impl fmt::Display for Polynomial {
    /// Formats as `P(x) = 3 + 2x - 1/2x^2`, omitting zero terms.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P(x) = ")?;
        let mut first = true;
        for (degree, coeff) in self.coefficients.iter().enumerate() {
            if coeff.is_zero() {
                continue;
            }
            let magnitude = coeff.abs();
            if first {
                if coeff.is_negative() {
                    write!(f, "-")?;
                }
                first = false;
            } else {
                write!(f, " {} ", if coeff.is_negative() { "-" } else { "+" })?;
            }
            let unit = magnitude.is_one() && degree > 0;
            if !unit {
                write!(f, "{}", format_coefficient(&magnitude))?;
            }
            match degree {
                0 => {}
                1 => write!(f, "x")?,
                _ => write!(f, "x^{degree}")?,
            }
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}
