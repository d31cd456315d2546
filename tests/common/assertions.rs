//! High-level assertion helpers for common test patterns.

#![allow(dead_code)]
//!
//! This module provides declarative assertion functions that encapsulate
//! the most common test patterns: reconstruct-and-check, fails-with, etc.

use kontor_shamir::{reconstruct_document, Reconstruction, ShareRecoveryError};
use num_bigint::BigInt;
use std::fmt::Debug;

/// Unwraps the error of a result that must have failed.
pub fn expect_err<T: Debug>(result: Result<T, ShareRecoveryError>) -> ShareRecoveryError {
    match result {
        Ok(value) => panic!("Expected an error, but got: {:?}", value),
        Err(error) => error,
    }
}

/// Asserts that the error message contains the expected substring.
pub fn assert_error_contains<T: Debug>(
    result: Result<T, ShareRecoveryError>,
    expected_substring: &str,
) {
    let error_msg = expect_err(result).to_string();
    assert!(
        error_msg.contains(expected_substring),
        "Expected error message to contain '{}', but got: {}",
        expected_substring,
        error_msg
    );
}

/// Asserts that reconstruction of `document` succeeds, verifies every point,
/// and yields `secret`.
pub fn assert_reconstructs(document: &str, secret: &BigInt) -> Reconstruction {
    let reconstruction =
        reconstruct_document(document).expect("Reconstruction should have succeeded");
    assert!(
        reconstruction.is_consistent(),
        "All points should lie on the reconstructed polynomial"
    );
    assert_eq!(
        reconstruction.secret_integer().as_ref(),
        Some(secret),
        "Recovered secret mismatch"
    );
    reconstruction
}

/// Asserts that reconstruction returns a secret but flags inconsistent points.
pub fn assert_reconstructs_with_mismatch(document: &str, mismatched_x: &[i64]) -> Reconstruction {
    let reconstruction = reconstruct_document(document)
        .expect("Mismatches must not prevent a secret from being returned");
    assert!(!reconstruction.is_consistent());
    let bad: Vec<i64> = reconstruction.report.mismatches().map(|c| c.x).collect();
    assert_eq!(bad, mismatched_x, "Unexpected set of mismatched points");
    reconstruction
}
