//! Centralized configuration for share reconstruction.
//!
//! This module contains constants and default parameters used throughout the
//! library and the CLI to ensure consistency and ease of modification.

// --- Document Limits ---

/// Maximum number of share entries accepted from a single document.
/// Scanning fails with `TooManyShares` rather than growing without bound.
pub const MAX_SHARES: usize = 100;

/// Maximum size for input documents (10 KB)
pub const MAX_DOCUMENT_SIZE_BYTES: usize = 10_000;

/// Longest literal accepted for an integer field (`n`, `k`, `base`).
pub const MAX_INTEGER_FIELD_LEN: usize = 19;

// --- Document Schema ---

/// Field holding the keyed share collection
pub const FIELD_KEYS: &str = "keys";

/// Field holding the declared share total
pub const FIELD_N: &str = "n";

/// Field holding the reconstruction threshold
pub const FIELD_K: &str = "k";

/// Per-share field holding the radix
pub const FIELD_BASE: &str = "base";

/// Per-share field holding the encoded digit string
pub const FIELD_VALUE: &str = "value";

// --- Digit Decoding ---

/// Smallest supported radix
pub const MIN_BASE: u32 = 2;

/// Largest supported radix (`0-9` then `a-z`)
pub const MAX_BASE: u32 = 36;

// --- Verification and Display ---

/// Verification tolerance is `1 / VERIFY_TOLERANCE_DENOMINATOR` (1e-9),
/// kept as an exact rational so the verdict never depends on float rounding.
pub const VERIFY_TOLERANCE_DENOMINATOR: u64 = 1_000_000_000;

/// Decimal places used when displaying evaluated points
pub const DISPLAY_DECIMALS: usize = 2;

/// Decimal places used when displaying polynomial coefficients
pub const COEFFICIENT_DECIMALS: usize = 6;

// --- Test-related Constants ---

/// A fixed random seed used in tests to ensure deterministic behavior.
pub const TEST_RANDOM_SEED: u64 = 42;
