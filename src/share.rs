//! Share records, decoded points, and the validated share dataset.
//!
//! A [`Share`] is the raw `(index, digits, base)` triple read from a document.
//! Decoding it yields a [`Point`]. The [`ShareDataset`] ties the declared
//! `n`/`k` to the decoded points and enforces the invariants interpolation
//! relies on: positive parameters, at least `k` points, distinct x values.

use crate::digits::decode_digits;
use crate::{config, Result, ShareRecoveryError};
use num_bigint::BigInt;
use std::collections::HashSet;
use tracing::{debug, debug_span, warn};

/// One participant's encoded fragment, exactly as written in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    /// Share index, used as the x coordinate
    pub x: i64,
    /// Digit string in `base`
    pub encoded_value: String,
    /// Radix of `encoded_value`
    pub base: u32,
}

impl Share {
    pub fn new(x: i64, encoded_value: impl Into<String>, base: u32) -> Self {
        Self {
            x,
            encoded_value: encoded_value.into(),
            base,
        }
    }

    /// Decodes the share into an exact integer point.
    pub fn decode(&self) -> Result<Point> {
        let y = decode_digits(&self.encoded_value, self.base)?;
        Ok(Point::new(self.x, y))
    }
}

/// A point `(x, y)` on the sharing polynomial.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i64,
    pub y: BigInt,
}

impl Point {
    pub fn new(x: i64, y: impl Into<BigInt>) -> Self {
        Self { x, y: y.into() }
    }
}

/// Ordered share storage with a hard capacity.
///
/// Pushing past the capacity fails with `TooManyShares` instead of silently
/// dropping entries.
#[derive(Debug, Clone)]
pub struct ShareBuffer {
    shares: Vec<Share>,
    capacity: usize,
}

impl Default for ShareBuffer {
    fn default() -> Self {
        Self::with_capacity(config::MAX_SHARES)
    }
}

impl ShareBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            shares: Vec::new(),
            capacity,
        }
    }

    pub fn push(&mut self, share: Share) -> Result<()> {
        if self.shares.len() >= self.capacity {
            return Err(ShareRecoveryError::TooManyShares { max: self.capacity });
        }
        self.shares.push(share);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[Share] {
        &self.shares
    }

    pub fn into_vec(self) -> Vec<Share> {
        self.shares
    }
}

/// A share paired with the point it decoded to, kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedShare {
    pub share: Share,
    pub point: Point,
}

/// The validated data model: declared total, threshold and decoded points.
///
/// Built once per document by [`ShareDataset::new`]; read-only afterwards.
#[derive(Debug, Clone)]
pub struct ShareDataset {
    declared_total: usize,
    threshold: usize,
    decoded: Vec<DecodedShare>,
    points: Vec<Point>,
}

impl ShareDataset {
    /// Decodes every share and validates the resulting point set.
    ///
    /// # Errors
    ///
    /// - `InvalidThreshold` if `n` or `k` is not positive
    /// - `InvalidDigit` / `InvalidBase` from the first share that fails to decode
    /// - `InsufficientShares` if fewer than `k` shares are present
    /// - `IllFormedPointSet` if two shares carry the same index
    pub fn new(n: i64, k: i64, shares: Vec<Share>) -> Result<Self> {
        let _span = debug_span!("share_dataset", n, k, shares = shares.len()).entered();

        let declared_total = positive(config::FIELD_N, n)?;
        let threshold = positive(config::FIELD_K, k)?;

        if threshold > declared_total {
            warn!(n, k, "threshold exceeds declared share total");
        }
        if shares.len() > declared_total {
            warn!(
                supplied = shares.len(),
                n, "more shares supplied than the document declares"
            );
        }

        let mut decoded = Vec::with_capacity(shares.len());
        for share in shares {
            let point = share.decode()?;
            debug!(
                x = share.x,
                base = share.base,
                value = %share.encoded_value,
                y = %point.y,
                "decoded share"
            );
            decoded.push(DecodedShare { share, point });
        }

        if decoded.len() < threshold {
            return Err(ShareRecoveryError::InsufficientShares {
                have: decoded.len(),
                need: threshold,
            });
        }

        let points: Vec<Point> = decoded.iter().map(|d| d.point.clone()).collect();
        ensure_distinct_x(&points)?;

        Ok(Self {
            declared_total,
            threshold,
            decoded,
            points,
        })
    }

    /// Declared total number of shares (`n`)
    pub fn declared_total(&self) -> usize {
        self.declared_total
    }

    /// Minimum shares required for reconstruction (`k`)
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// All decoded points in document order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The first `k` points, which feed interpolation
    pub fn selected_points(&self) -> &[Point] {
        &self.points[..self.threshold]
    }

    /// Per-share decode trace in document order
    pub fn decoded_shares(&self) -> &[DecodedShare] {
        &self.decoded
    }
}

fn positive(field: &str, value: i64) -> Result<usize> {
    usize::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| ShareRecoveryError::InvalidThreshold {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Rejects point sets in which two points share an x coordinate.
pub fn ensure_distinct_x(points: &[Point]) -> Result<()> {
    let mut seen = HashSet::with_capacity(points.len());
    for point in points {
        if !seen.insert(point.x) {
            return Err(ShareRecoveryError::IllFormedPointSet { x: point.x });
        }
    }
    Ok(())
}
