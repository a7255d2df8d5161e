// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Query allow-list and validation result types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A free-form filter object.
pub type QueryObject = Map<String, Value>;

/// Permitted attribute paths and top-level operators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowList {
    /// Exact paths (`name`, `user.name`), prefix wildcards (`user.*`) or `*`.
    #[serde(default)]
    pub fields: Vec<String>,
    /// Operators such as `$or` and `$and`.
    #[serde(default)]
    pub operators: Vec<String>,
}

impl AllowList {
    pub fn new<F, O>(fields: F, operators: O) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            operators: operators.into_iter().map(Into::into).collect(),
        }
    }
}

/// A parsed allow-list field entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPattern {
    /// Matches exactly this path.
    Exact(String),
    /// `prefix.*`: matches any path nested below `prefix`.
    Prefix(String),
    /// `*` (or any entry with a trailing `*` not preceded by a dot).
    Any,
}

/// How a path was admitted by the allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AllowListMatch {
    Any,
    Prefix,
    Exact,
}

/// Outcome of a single validation call.
///
/// Each call owns its error list; stops at the first failure, so `errors`
/// holds at most the one message that caused rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl QueryValidation {
    pub fn accepted() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn rejected(message: String) -> Self {
        Self {
            valid: false,
            errors: vec![message],
        }
    }
}

/// Decoded `query`/`sort`/`fields` request parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JsonQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Map<String, Value>>,
    pub query: QueryObject,
}
