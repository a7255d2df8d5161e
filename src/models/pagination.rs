// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pagination request/limit/result types.

use serde::{Deserialize, Serialize};

/// A raw numeric request value, as received from a JSON body or a query string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(serde_json::Number),
    Text(String),
}

impl From<i64> for RawNumber {
    fn from(value: i64) -> Self {
        RawNumber::Number(value.into())
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        RawNumber::Text(value.to_string())
    }
}

impl From<String> for RawNumber {
    fn from(value: String) -> Self {
        RawNumber::Text(value)
    }
}

/// Pagination values supplied by the client. Both fields are untrusted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationRequest {
    #[serde(default)]
    pub offset: Option<RawNumber>,
    #[serde(default)]
    pub count: Option<RawNumber>,
}

impl PaginationRequest {
    pub fn new(offset: Option<RawNumber>, count: Option<RawNumber>) -> Self {
        Self { offset, count }
    }
}

/// Operator-configured pagination limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationLimits {
    /// Maximum page size. Values below the hard floor are raised to it.
    pub upper_limit: i64,
    /// Page size used when the client sends none (or an unusable one).
    pub default_count: i64,
    /// Whether `count=0` means "no limit".
    pub allow_infinite: bool,
}

impl Default for PaginationLimits {
    fn default() -> Self {
        Self {
            upper_limit: 100,
            default_count: 50,
            allow_infinite: false,
        }
    }
}

/// Normalized `skip`/`limit` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationResult {
    /// Zero-based skip count.
    pub offset: i64,
    /// Page size; `0` only when infinite pages are allowed.
    pub count: i64,
}
