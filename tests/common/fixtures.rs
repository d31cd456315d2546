//! Test fixtures and scenario configuration.
//!
//! This module provides `DocumentBuilder` for declarative document setup and
//! `Dealer`, which splits a random secret into consistent shares.

#![allow(dead_code)]

use kontor_shamir::{config, Point};
use num_bigint::BigInt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One share entry in a test document.
#[derive(Debug, Clone)]
pub struct ShareSpec {
    /// Key written for the entry (normally the decimal index)
    pub key: String,
    pub base: u32,
    pub value: String,
    /// Write `"base": "10"` instead of `"base": 10`
    pub quoted_base: bool,
    /// Write `value` before `base`
    pub value_first: bool,
}

impl ShareSpec {
    pub fn new(x: i64, base: u32, value: &str) -> Self {
        Self {
            key: x.to_string(),
            base,
            value: value.to_string(),
            quoted_base: true,
            value_first: false,
        }
    }

    pub fn bare_base(mut self) -> Self {
        self.quoted_base = false;
        self
    }

    pub fn value_first(mut self) -> Self {
        self.value_first = true;
        self
    }

    fn render(&self) -> String {
        let base = if self.quoted_base {
            format!("\"base\": \"{}\"", self.base)
        } else {
            format!("\"base\": {}", self.base)
        };
        let value = format!("\"value\": \"{}\"", self.value);
        let (first, second) = if self.value_first {
            (value, base)
        } else {
            (base, value)
        };
        format!(
            "        \"{}\": {{\n            {},\n            {}\n        }}",
            self.key, first, second
        )
    }
}

/// Builds share documents in the layout the CLI consumes.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    pub n: Option<String>,
    pub k: Option<String>,
    pub shares: Vec<ShareSpec>,
    /// Emit `n`/`k` before the `keys` section
    pub thresholds_first: bool,
    /// Extra top-level members written verbatim, e.g. `"note": "x"`
    pub extra: Vec<String>,
}

impl DocumentBuilder {
    pub fn new(n: i64, k: i64) -> Self {
        Self {
            n: Some(n.to_string()),
            k: Some(k.to_string()),
            shares: Vec::new(),
            thresholds_first: false,
            extra: Vec::new(),
        }
    }

    /// The reference document: shares 1, 2, 3, 6 with n = 4, k = 3.
    pub fn reference() -> Self {
        Self::new(4, 3)
            .share(ShareSpec::new(1, 10, "4"))
            .share(ShareSpec::new(2, 2, "111"))
            .share(ShareSpec::new(3, 10, "12"))
            .share(ShareSpec::new(6, 4, "213"))
    }

    pub fn share(mut self, spec: ShareSpec) -> Self {
        self.shares.push(spec);
        self
    }

    pub fn without_n(mut self) -> Self {
        self.n = None;
        self
    }

    pub fn raw_k(mut self, literal: &str) -> Self {
        self.k = Some(literal.to_string());
        self
    }

    pub fn thresholds_first(mut self) -> Self {
        self.thresholds_first = true;
        self
    }

    pub fn extra(mut self, member: &str) -> Self {
        self.extra.push(member.to_string());
        self
    }

    pub fn build(&self) -> String {
        let keys = format!(
            "    \"keys\": {{\n{}\n    }}",
            self.shares
                .iter()
                .map(ShareSpec::render)
                .collect::<Vec<_>>()
                .join(",\n")
        );
        let mut thresholds = Vec::new();
        if let Some(n) = &self.n {
            thresholds.push(format!("    \"n\": {n}"));
        }
        if let Some(k) = &self.k {
            thresholds.push(format!("    \"k\": {k}"));
        }

        let mut members: Vec<String> = self.extra.iter().map(|m| format!("    {m}")).collect();
        if self.thresholds_first {
            members.extend(thresholds);
            members.push(keys);
        } else {
            members.push(keys);
            members.extend(thresholds);
        }
        format!("{{\n{}\n}}\n", members.join(",\n"))
    }
}

/// Splits random secrets into consistent shares with a seeded RNG.
pub struct Dealer {
    rng: StdRng,
}

impl Default for Dealer {
    fn default() -> Self {
        Self::with_seed(config::TEST_RANDOM_SEED)
    }
}

impl Dealer {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A non-negative integer of roughly `limbs * 64` bits.
    pub fn random_big(&mut self, limbs: usize) -> BigInt {
        let mut value = BigInt::from(0u32);
        for _ in 0..limbs {
            value = (value << 64) + self.rng.gen::<u64>();
        }
        value
    }

    /// Random non-negative coefficients for a degree `k - 1` polynomial.
    pub fn random_coefficients(&mut self, k: usize, limbs: usize) -> Vec<BigInt> {
        (0..k).map(|_| self.random_big(limbs)).collect()
    }

    pub fn random_base(&mut self) -> u32 {
        self.rng.gen_range(config::MIN_BASE..=config::MAX_BASE)
    }

    /// Points `(x, P(x))` for `x = 1..=n`.
    pub fn deal(&mut self, coefficients: &[BigInt], n: usize) -> Vec<Point> {
        (1..=n as i64)
            .map(|x| Point::new(x, evaluate_integer(coefficients, x)))
            .collect()
    }

    /// Encodes points as share specs in random bases.
    pub fn encode(&mut self, points: &[Point]) -> Vec<ShareSpec> {
        points
            .iter()
            .map(|p| {
                let base = self.random_base();
                let mut spec = ShareSpec::new(p.x, base, &p.y.to_str_radix(base));
                if self.rng.gen_bool(0.5) {
                    spec = spec.bare_base();
                }
                spec
            })
            .collect()
    }
}

/// Evaluates an integer polynomial at `x` (Horner).
pub fn evaluate_integer(coefficients: &[BigInt], x: i64) -> BigInt {
    let x = BigInt::from(x);
    coefficients
        .iter()
        .rev()
        .fold(BigInt::from(0u32), |acc, c| acc * &x + c)
}
