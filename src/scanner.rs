//! Restricted-grammar scanner for share documents.
//!
//! The scanner does not build a parse tree. It locates the three fields it
//! needs (`n`, `k` and the `keys` collection) with targeted, quote-aware
//! searches and walks the `keys` object entry by entry. The only structural
//! hazard it guards against is delimiter characters inside quoted strings.
//!
//! ## Primitives
//!
//! - [`find_unescaped`]: search for a delimiter while tracking whether the
//!   cursor is inside a string (states: normal / in-string / escaped)
//! - [`skip_whitespace`]: advance past ASCII whitespace
//! - bounded field extraction: strip quotes from a span or parse it as an integer
//!
//! ## Example
//!
//! ```rust
//! use kontor_shamir::scanner::scan_document;
//! use num_bigint::BigInt;
//!
//! let text = r#"{ "keys": { "1": { "base": 10, "value": "4" } }, "n": 1, "k": 1 }"#;
//! let dataset = scan_document(text)?;
//! assert_eq!(dataset.threshold(), 1);
//! assert_eq!(dataset.points()[0].y, BigInt::from(4));
//! # Ok::<(), kontor_shamir::ShareRecoveryError>(())
//! ```

use crate::digits::validate_base;
use crate::share::{Share, ShareBuffer, ShareDataset};
use crate::{config, Result, ShareRecoveryError};
use tracing::{debug, debug_span};

/// Lexical state of the quote-aware scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    InString,
    Escaped,
}

impl ScanState {
    /// Advances the state over one byte.
    fn step(self, byte: u8) -> Self {
        match (self, byte) {
            (ScanState::Normal, b'"') => ScanState::InString,
            (ScanState::Normal, _) => ScanState::Normal,
            (ScanState::InString, b'\\') => ScanState::Escaped,
            (ScanState::InString, b'"') => ScanState::Normal,
            (ScanState::InString, _) => ScanState::InString,
            (ScanState::Escaped, _) => ScanState::InString,
        }
    }
}

/// Fields extracted from a document before decoding and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedDocument {
    /// Declared total number of shares
    pub n: i64,
    /// Reconstruction threshold
    pub k: i64,
    /// Share records in document order
    pub shares: Vec<Share>,
}

/// Returns the first position at or after `from` that is not ASCII whitespace.
pub fn skip_whitespace(bytes: &[u8], from: usize) -> usize {
    let mut pos = from;
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

/// Finds the first `target` at or after `from` that lies outside any quoted string.
pub fn find_unescaped(bytes: &[u8], from: usize, target: u8) -> Option<usize> {
    find_first_unescaped(bytes, from, &[target])
}

/// Finds the first byte from `targets` at or after `from` outside any quoted string.
pub fn find_first_unescaped(bytes: &[u8], from: usize, targets: &[u8]) -> Option<usize> {
    let mut state = ScanState::Normal;
    for (pos, &byte) in bytes.iter().enumerate().skip(from) {
        if state == ScanState::Normal && targets.contains(&byte) {
            return Some(pos);
        }
        state = state.step(byte);
    }
    None
}

/// Given the position of an opening `{` or `[`, finds its matching close.
fn find_matching_close(bytes: &[u8], open: usize) -> Option<usize> {
    let mut state = ScanState::Normal;
    let mut depth = 0usize;
    for (pos, &byte) in bytes.iter().enumerate().skip(open) {
        if state == ScanState::Normal {
            match byte {
                b'{' | b'[' => depth += 1,
                b'}' | b']' => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(pos);
                    }
                }
                _ => {}
            }
        }
        state = state.step(byte);
    }
    None
}

/// Reads a quoted string starting at `pos`.
///
/// Returns the content span `(start, end)` without quotes and the position
/// just past the closing quote. Escape sequences are skipped, not decoded.
fn read_quoted(bytes: &[u8], pos: usize) -> Option<(usize, usize, usize)> {
    if bytes.get(pos) != Some(&b'"') {
        return None;
    }
    let mut state = ScanState::InString;
    for (i, &byte) in bytes.iter().enumerate().skip(pos + 1) {
        state = state.step(byte);
        if state == ScanState::Normal {
            return Some((pos + 1, i, i + 1));
        }
    }
    None
}

/// Locates `"name":` among the direct members of the region `[start, end)`
/// and returns the position just past the colon.
///
/// A region starting at its own `{` sees its members at depth 1; a bare
/// top-level document without braces sees them at depth 0.
fn find_field(bytes: &[u8], start: usize, end: usize, name: &str) -> Option<usize> {
    let end = end.min(bytes.len());
    let mut depth = 0usize;
    let mut pos = start;
    while pos < end {
        match bytes[pos] {
            b'{' | b'[' => depth += 1,
            b'}' | b']' => depth = depth.saturating_sub(1),
            b'"' => {
                let (content_start, content_end, after) = read_quoted(bytes, pos)?;
                if depth <= 1 && &bytes[content_start..content_end] == name.as_bytes() {
                    let colon = skip_whitespace(bytes, after);
                    if colon < end && bytes[colon] == b':' {
                        return Some(colon + 1);
                    }
                }
                pos = after;
                continue;
            }
            _ => {}
        }
        pos += 1;
    }
    None
}

/// Returns the trimmed span of a scalar value starting at `from`, ending at
/// the next structural `,`, `}` or `]` (or `limit`).
fn scalar_span(bytes: &[u8], from: usize, limit: usize) -> (usize, usize) {
    let start = skip_whitespace(bytes, from).min(limit);
    let mut end = find_first_unescaped(bytes, start, b",}]")
        .unwrap_or(limit)
        .min(limit);
    while end > start && bytes[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    (start, end)
}

/// Strips one pair of surrounding quotes, if present.
fn strip_quotes(raw: &str) -> &str {
    raw.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(raw)
}

/// Parses a bounded integer literal, quoted or bare.
fn parse_integer(raw: &str) -> Option<i64> {
    let literal = strip_quotes(raw.trim()).trim();
    let digits = literal
        .strip_prefix('-')
        .or_else(|| literal.strip_prefix('+'))
        .unwrap_or(literal);
    if digits.is_empty()
        || digits.len() > config::MAX_INTEGER_FIELD_LEN
        || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    literal.parse().ok()
}

/// Reads a required top-level integer field such as `n` or `k`.
fn read_threshold_field(text: &str, name: &str) -> Result<i64> {
    let bytes = text.as_bytes();
    let colon = find_field(bytes, 0, bytes.len(), name)
        .ok_or_else(|| ShareRecoveryError::missing(name))?;
    let (start, end) = scalar_span(bytes, colon, bytes.len());
    let raw = &text[start..end];
    let value = parse_integer(raw).ok_or_else(|| ShareRecoveryError::InvalidThreshold {
        field: name.to_string(),
        value: raw.to_string(),
    })?;
    debug!(field = name, value, "parsed threshold field");
    Ok(value)
}

/// Extracts `base` and `value` from one share object spanning `[open, close]`.
fn scan_share_object(text: &str, key: &str, x: i64, open: usize, close: usize) -> Result<Share> {
    let bytes = text.as_bytes();

    let base_colon = find_field(bytes, open, close + 1, config::FIELD_BASE).ok_or_else(|| {
        ShareRecoveryError::missing(format!(
            "{}.{}.{}",
            config::FIELD_KEYS,
            key,
            config::FIELD_BASE
        ))
    })?;
    let (start, end) = scalar_span(bytes, base_colon, close);
    let raw_base = &text[start..end];
    let base = parse_integer(raw_base)
        .and_then(|b| u32::try_from(b).ok())
        .ok_or_else(|| ShareRecoveryError::InvalidBase {
            base: strip_quotes(raw_base).to_string(),
        })
        .and_then(validate_base)?;

    let value_colon = find_field(bytes, open, close + 1, config::FIELD_VALUE).ok_or_else(|| {
        ShareRecoveryError::missing(format!(
            "{}.{}.{}",
            config::FIELD_KEYS,
            key,
            config::FIELD_VALUE
        ))
    })?;
    let value_start = skip_whitespace(bytes, value_colon);
    let (content_start, content_end, _) = read_quoted(bytes, value_start)
        .filter(|(_, _, after)| *after <= close)
        .ok_or_else(|| {
            ShareRecoveryError::malformed(value_start, "share value must be a quoted string")
        })?;

    Ok(Share::new(x, &text[content_start..content_end], base))
}

/// Walks the `keys` object spanning `[open, close]` and collects its shares.
fn scan_share_map(text: &str, open: usize, close: usize) -> Result<Vec<Share>> {
    let bytes = text.as_bytes();
    let mut buffer = ShareBuffer::default();
    let mut pos = open + 1;

    loop {
        pos = skip_whitespace(bytes, pos);
        if pos >= close {
            break;
        }
        if bytes[pos] == b',' {
            pos = skip_whitespace(bytes, pos + 1);
            if pos >= close {
                break;
            }
        }

        let (key_start, key_end, after_key) = read_quoted(bytes, pos)
            .filter(|(_, _, after)| *after <= close)
            .ok_or_else(|| ShareRecoveryError::malformed(pos, "expected quoted share index"))?;
        let key = &text[key_start..key_end];
        let x = key
            .trim()
            .parse::<i64>()
            .map_err(|_| ShareRecoveryError::InvalidShareIndex {
                key: key.to_string(),
            })?;

        let colon = skip_whitespace(bytes, after_key);
        if colon >= close || bytes[colon] != b':' {
            return Err(ShareRecoveryError::malformed(
                colon,
                format!("expected ':' after share index \"{key}\""),
            ));
        }
        let object_open = skip_whitespace(bytes, colon + 1);
        if object_open >= close || bytes[object_open] != b'{' {
            return Err(ShareRecoveryError::malformed(
                object_open,
                format!("expected '{{' to open share \"{key}\""),
            ));
        }
        let object_close = find_matching_close(bytes, object_open)
            .filter(|c| *c < close)
            .ok_or_else(|| {
                ShareRecoveryError::malformed(object_open, format!("unterminated share \"{key}\""))
            })?;

        let share = scan_share_object(text, key, x, object_open, object_close)?;
        debug!(
            x = share.x,
            base = share.base,
            value = %share.encoded_value,
            "parsed share"
        );
        buffer.push(share)?;

        pos = object_close + 1;
    }

    Ok(buffer.into_vec())
}

/// Extracts `n`, `k` and the share records from a document without decoding.
///
/// # Errors
///
/// - `MissingSection` if `n`, `k`, `keys` or the opening `{` of `keys` is absent
/// - `InvalidThreshold` if `n` or `k` is not an integer literal
/// - `MalformedEntry` / `InvalidShareIndex` / `InvalidBase` for broken share entries
/// - `TooManyShares` if `keys` holds more than [`config::MAX_SHARES`] entries
pub fn scan_fields(text: &str) -> Result<ScannedDocument> {
    let _span = debug_span!("scan_document", bytes = text.len()).entered();
    let bytes = text.as_bytes();

    let keys_colon = find_field(bytes, 0, bytes.len(), config::FIELD_KEYS)
        .ok_or_else(|| ShareRecoveryError::missing(config::FIELD_KEYS))?;
    let open = skip_whitespace(bytes, keys_colon);
    if bytes.get(open) != Some(&b'{') {
        return Err(ShareRecoveryError::missing(format!(
            "{} object",
            config::FIELD_KEYS
        )));
    }
    let close = find_matching_close(bytes, open).ok_or_else(|| {
        ShareRecoveryError::missing(format!("closing '}}' of {}", config::FIELD_KEYS))
    })?;

    let shares = scan_share_map(text, open, close)?;
    let n = read_threshold_field(text, config::FIELD_N)?;
    let k = read_threshold_field(text, config::FIELD_K)?;

    debug!(n, k, shares = shares.len(), "scanned document");
    Ok(ScannedDocument { n, k, shares })
}

/// Scans a document and builds the validated [`ShareDataset`].
pub fn scan_document(text: &str) -> Result<ShareDataset> {
    let scanned = scan_fields(text)?;
    ShareDataset::new(scanned.n, scanned.k, scanned.shares)
}
