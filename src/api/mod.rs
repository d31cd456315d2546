//! A high-level API for reconstructing a secret from a share document.
//!
//! This module wires the scanner, decoder, interpolation engine and verifier
//! into one synchronous pipeline.
//!
//! ## Core Workflow
//!
//! 1. **`load_document()`**: Reads a document fully into memory, enforcing the
//!    size limit. The file handle is released before any parsing happens.
//! 2. **`reconstruct_document()`**: Scans `n`, `k` and the `keys` collection,
//!    decodes every share, interpolates the first `k` points and verifies the
//!    result against all points.
//! 3. **`Reconstruction`**: Carries the decode trace, the polynomial, the
//!    verification report and the secret `P(0)`.
//!
//! Every parsing or decoding error aborts the run. A verification mismatch
//! does not: the secret is still returned and `is_consistent()` is false.
//!
//! ## Example
//!
//! ```rust
//! use kontor_shamir::api::{reconstruct_document, sample_document};
//! use num_bigint::BigInt;
//!
//! let reconstruction = reconstruct_document(sample_document())?;
//! assert!(reconstruction.is_consistent());
//! assert_eq!(reconstruction.secret_integer(), Some(BigInt::from(3)));
//! # Ok::<(), kontor_shamir::ShareRecoveryError>(())
//! ```

mod types;

pub use types::{
    CheckSummary, PointSummary, Reconstruction, ReconstructionSummary, ShareSummary,
};

// Re-export key external types for easier access.
pub use crate::{Result, ShareRecoveryError};

use crate::polynomial::interpolate;
use crate::scanner::scan_document;
use crate::share::{ensure_distinct_x, Point, Share, ShareDataset};
use crate::verify::verify;
use crate::config;
use std::fs;
use std::path::Path;
use tracing::{debug_span, info};

/// The reference share document: four shares, `n = 4`, `k = 3`, secret 3.
const SAMPLE_DOCUMENT: &str = r#"{
    "keys": {
        "1": {
            "base": "10",
            "value": "4"
        },
        "2": {
            "base": "2",
            "value": "111"
        },
        "3": {
            "base": "10",
            "value": "12"
        },
        "6": {
            "base": "4",
            "value": "213"
        }
    },
    "n": 4,
    "k": 3
}
"#;

/// Returns the text of the reference share document.
pub fn sample_document() -> &'static str {
    SAMPLE_DOCUMENT
}

/// The reference shares as records, without going through the scanner.
pub fn example_shares() -> Vec<Share> {
    vec![
        Share::new(1, "4", 10),
        Share::new(2, "111", 2),
        Share::new(3, "12", 10),
        Share::new(6, "213", 4),
    ]
}

/// Threshold of the reference example
pub const EXAMPLE_THRESHOLD: usize = 3;

/// Reads a share document from disk.
///
/// # Errors
///
/// Returns `DocumentTooLarge` if the file exceeds
/// [`config::MAX_DOCUMENT_SIZE_BYTES`] and `IO` if it cannot be read as UTF-8.
pub fn load_document(path: &Path) -> Result<String> {
    let size = fs::metadata(path)
        .map_err(|e| {
            ShareRecoveryError::IO(format!("Failed to stat {}: {}", path.display(), e))
        })?
        .len() as usize;

    if size > config::MAX_DOCUMENT_SIZE_BYTES {
        return Err(ShareRecoveryError::DocumentTooLarge {
            size,
            max: config::MAX_DOCUMENT_SIZE_BYTES,
        });
    }

    let text = fs::read_to_string(path).map_err(|e| {
        ShareRecoveryError::IO(format!("Failed to read {}: {}", path.display(), e))
    })?;

    // the file may have grown between stat and read
    if text.len() > config::MAX_DOCUMENT_SIZE_BYTES {
        return Err(ShareRecoveryError::DocumentTooLarge {
            size: text.len(),
            max: config::MAX_DOCUMENT_SIZE_BYTES,
        });
    }

    info!(bytes = text.len(), path = %path.display(), "loaded share document");
    Ok(text)
}

/// Runs the full pipeline on a document's text.
pub fn reconstruct_document(text: &str) -> Result<Reconstruction> {
    let dataset = scan_document(text)?;
    reconstruct_dataset(&dataset)
}

/// Interpolates the first `k` points of a validated dataset and verifies all of them.
pub fn reconstruct_dataset(dataset: &ShareDataset) -> Result<Reconstruction> {
    let _span = debug_span!(
        "reconstruct",
        n = dataset.declared_total(),
        k = dataset.threshold()
    )
    .entered();

    let polynomial = interpolate(dataset.points(), dataset.threshold())?;
    let report = verify(&polynomial, dataset.points());

    Ok(Reconstruction {
        declared_total: dataset.declared_total(),
        threshold: dataset.threshold(),
        decoded_shares: dataset.decoded_shares().to_vec(),
        selected_points: dataset.selected_points().to_vec(),
        polynomial,
        report,
    })
}

/// Runs interpolation and verification on already-decoded points.
///
/// `n` is taken to be the number of points supplied.
pub fn reconstruct_points(points: &[Point], k: usize) -> Result<Reconstruction> {
    let _span = debug_span!("reconstruct", n = points.len(), k).entered();

    ensure_distinct_x(points)?;
    let polynomial = interpolate(points, k)?;
    let report = verify(&polynomial, points);

    Ok(Reconstruction {
        declared_total: points.len(),
        threshold: k,
        decoded_shares: Vec::new(),
        selected_points: points[..k].to_vec(),
        polynomial,
        report,
    })
}

/// Decodes and reconstructs the built-in reference example.
pub fn reconstruct_example() -> Result<Reconstruction> {
    let shares = example_shares();
    let dataset = ShareDataset::new(shares.len() as i64, EXAMPLE_THRESHOLD as i64, shares)?;
    reconstruct_dataset(&dataset)
}
