// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pagination normalization.
//!
//! Turns untrusted `offset`/`count` request values into a safe `skip`/`limit`
//! pair. Invalid input never fails; it degrades to defaults.

use crate::models::{PaginationLimits, PaginationRequest, PaginationResult, RawNumber};

/// Configured upper limits below this are raised to it.
pub const HARD_UPPER_LIMIT_FLOOR: i64 = 100;
/// Configured default counts below this are raised to it.
pub const DEFAULT_COUNT_FLOOR: i64 = 50;

/// Derive `(offset, count)` from the raw request and configured limits.
///
/// A negative offset is passed through as-is; only an unparseable offset
/// becomes 0.
pub fn normalize_pagination(
    request: &PaginationRequest,
    limits: &PaginationLimits,
) -> PaginationResult {
    let hard_upper_limit = limits.upper_limit.max(HARD_UPPER_LIMIT_FLOOR);
    let default_count = limits.default_count.max(DEFAULT_COUNT_FLOOR);

    let offset = request.offset.as_ref().and_then(parse_integer).unwrap_or(0);

    let mut count = request
        .count
        .as_ref()
        .and_then(parse_integer)
        .unwrap_or(default_count);

    if count == 0 && !limits.allow_infinite {
        count = default_count;
    }

    if count > hard_upper_limit {
        tracing::debug!(
            requested = count,
            limit = hard_upper_limit,
            "Clamping requested page size"
        );
        count = hard_upper_limit;
    }

    PaginationResult { offset, count }
}

/// Parse a raw request value as an integer.
///
/// Strings are read leniently: leading whitespace and an optional sign,
/// then the leading run of decimal digits (`"20abc"` is 20, `"1.5"` is 1).
/// Numbers are truncated toward zero. Anything else, including values that
/// do not fit in an `i64`, is `None`.
pub fn parse_integer(raw: &RawNumber) -> Option<i64> {
    match raw {
        RawNumber::Number(n) => {
            if let Some(v) = n.as_i64() {
                return Some(v);
            }
            let f = n.as_f64()?.trunc();
            if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
                Some(f as i64)
            } else {
                None
            }
        }
        RawNumber::Text(s) => parse_integer_prefix(s),
    }
}

fn parse_integer_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let digits = &rest[..digits_len];
    if negative {
        format!("-{digits}").parse().ok()
    } else {
        digits.parse().ok()
    }
}
