//! Kontor threshold secret reconstruction library
//!
//! This library recovers a secret split with Shamir's threshold scheme. Shares
//! are supplied as `(index, digit string, base)` records inside a small
//! object-like document; each is decoded to an exact integer point, the first
//! `k` points are interpolated with Lagrange's method, and the secret is the
//! polynomial's value at `x = 0`. Every supplied point is then checked against
//! the polynomial to flag corrupted or inconsistent shares.
//!
//! ## Main Components
//!
//! - [`digits`]: Arbitrary-radix (2-36) digit decoding into big integers
//! - [`scanner`]: Quote-aware scanner extracting `n`, `k` and the share map
//! - [`share`]: Share records, points, and the validated dataset
//! - [`polynomial`]: Exact-rational Lagrange interpolation and evaluation
//! - [`verify`]: Per-point consistency report
//! - [`api`]: The end-to-end pipeline
//! - [`config`]: Centralized configuration constants
//!
//! ## Error Handling
//!
//! Core functions return `Result<T, ShareRecoveryError>`:
//!
//! - `scan_document()` returns `Result<ShareDataset, ShareRecoveryError>`
//! - `decode_digits()` returns `Result<BigInt, ShareRecoveryError>`
//! - `interpolate()` returns `Result<Polynomial, ShareRecoveryError>`
//! - `reconstruct_document()` returns `Result<Reconstruction, ShareRecoveryError>`
//!
//! Verification never fails; mismatches are reported in the
//! [`VerificationReport`] alongside the secret.
//!
//! ## Quick Start
//!
//! ```rust
//! use kontor_shamir::{reconstruct_document, ShareRecoveryError};
//! use num_bigint::BigInt;
//!
//! let document = r#"{
//!     "keys": {
//!         "1": { "base": "10", "value": "4" },
//!         "2": { "base": "2",  "value": "111" },
//!         "3": { "base": "10", "value": "12" },
//!         "6": { "base": "4",  "value": "213" }
//!     },
//!     "n": 4,
//!     "k": 3
//! }"#;
//!
//! let reconstruction = reconstruct_document(document)?;
//! assert_eq!(reconstruction.secret_integer(), Some(BigInt::from(3)));
//! assert!(reconstruction.is_consistent());
//! # Ok::<(), ShareRecoveryError>(())
//! ```

pub mod api;
pub mod config;
pub mod digits;
pub mod error;
pub mod polynomial;
pub mod scanner;
pub mod share;
pub mod verify;

// Re-export commonly used types and functions for convenience
pub use api::{load_document, reconstruct_document, reconstruct_points, Reconstruction};
pub use digits::decode_digits;
pub use error::{Result, ShareRecoveryError};
pub use polynomial::{evaluate, interpolate, Polynomial};
pub use scanner::{scan_document, scan_fields, ScannedDocument};
pub use share::{DecodedShare, Point, Share, ShareBuffer, ShareDataset};
pub use verify::{verify, PointCheck, VerificationReport};
