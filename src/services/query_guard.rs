// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Query allow-list validation and sanitization.
//!
//! Filters arrive from clients as free-form JSON objects. Before a filter is
//! handed to a data store it must pass [`is_valid_query`]: every attribute
//! must be allow-listed and every top-level `$` operator must be permitted
//! and take an array of sub-clauses. Prototype-tampering keys are always
//! stripped first and never surface as failures.

use crate::models::{AllowListMatch, FieldPattern, QueryObject, QueryValidation};
use serde_json::{Map, Value};

/// Property names stripped from every object before validation.
pub const DANGEROUS_KEYS: [&str; 3] = ["__proto__", "constructor", "prototype"];

/// Errors for input that is not a query at all.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueryGuardError {
    #[error("query must be an object")]
    NotAnObject,
}

fn is_dangerous_key(key: &str) -> bool {
    DANGEROUS_KEYS.contains(&key)
}

fn is_operator(key: &str) -> bool {
    key.starts_with('$')
}

fn contains<S: AsRef<str>>(list: &[S], key: &str) -> bool {
    list.iter().any(|item| item.as_ref() == key)
}

/// Recursively remove dangerous keys from every object reachable from `value`.
pub fn remove_dangerous_props(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| !is_dangerous_key(key))
                .map(|(key, v)| (key, remove_dangerous_props(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(remove_dangerous_props).collect()),
        other => other,
    }
}

/// Remove top-level `$` keys that are not in `allowed_operators`.
pub fn clean_operators<S: AsRef<str>>(query: QueryObject, allowed_operators: &[S]) -> QueryObject {
    query
        .into_iter()
        .filter(|(key, _)| !is_operator(key) || contains(allowed_operators, key))
        .collect()
}

/// Strip dangerous keys, then disallowed top-level operators.
///
/// Non-object values only have dangerous keys removed from nested objects.
pub fn sanitize_query<S: AsRef<str>>(query: Value, allowed_operators: &[S]) -> Value {
    match remove_dangerous_props(query) {
        Value::Object(map) => Value::Object(clean_operators(map, allowed_operators)),
        other => other,
    }
}

/// Parse one allow-list entry.
pub fn parse_allow_list_entry(entry: &str) -> FieldPattern {
    if let Some(prefix) = entry.strip_suffix(".*") {
        FieldPattern::Prefix(prefix.to_string())
    } else if entry.ends_with('*') {
        FieldPattern::Any
    } else {
        FieldPattern::Exact(entry.to_string())
    }
}

/// Parse a full allow-list.
pub fn parse_allow_list<S: AsRef<str>>(entries: &[S]) -> Vec<FieldPattern> {
    entries
        .iter()
        .map(|e| parse_allow_list_entry(e.as_ref()))
        .collect()
}

/// Find the strongest allow-list match for `path`.
///
/// `Exact` beats `Prefix` beats `Any`. A prefix entry `user.*` only admits
/// paths strictly below `user`, never `user` itself.
pub fn match_field(path: &str, patterns: &[FieldPattern]) -> Option<AllowListMatch> {
    patterns
        .iter()
        .filter_map(|pattern| match pattern {
            FieldPattern::Exact(p) if p == path => Some(AllowListMatch::Exact),
            FieldPattern::Prefix(prefix)
                if path
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with('.')) =>
            {
                Some(AllowListMatch::Prefix)
            }
            FieldPattern::Any => Some(AllowListMatch::Any),
            _ => None,
        })
        .max()
}

/// Validate `query` against the allowed attribute paths and operators.
///
/// Returns `Err` only when the input is not an object. Policy violations
/// produce `valid == false` with the diagnostic for the first failing key.
pub fn is_valid_query<F: AsRef<str>, O: AsRef<str>>(
    query: &Value,
    allowed_fields: &[F],
    allowed_operators: &[O],
) -> Result<QueryValidation, QueryGuardError> {
    let sanitized = remove_dangerous_props(query.clone());
    let Value::Object(map) = sanitized else {
        return Err(QueryGuardError::NotAnObject);
    };

    let guard = Guard {
        fields: parse_allow_list(allowed_fields),
        operators: allowed_operators.iter().map(|o| o.as_ref()).collect(),
    };

    Ok(match guard.verify_clause(&map) {
        Ok(()) => QueryValidation::accepted(),
        Err(message) => QueryValidation::rejected(message),
    })
}

struct Guard<'a> {
    fields: Vec<FieldPattern>,
    operators: Vec<&'a str>,
}

impl Guard<'_> {
    fn operator_allowed(&self, key: &str) -> bool {
        self.operators.contains(&key)
    }

    /// A top-level clause: the query itself or one element of `$or`/`$and`.
    fn verify_clause(&self, clause: &Map<String, Value>) -> Result<(), String> {
        for (key, value) in clause {
            if is_operator(key) {
                self.verify_operator(key, value)?;
            } else {
                self.verify_attribute(key, value)?;
            }
        }
        Ok(())
    }

    fn verify_operator(&self, key: &str, value: &Value) -> Result<(), String> {
        if !self.operator_allowed(key) {
            return Err(format!("Invalid operation: {key}"));
        }
        let Value::Array(clauses) = value else {
            return Err(format!("Invalid parameter for operation: {key} : {value}"));
        };
        for clause in clauses {
            let Value::Object(clause) = clause else {
                return Err(format!("Invalid parameter for operation: {key} : {clause}"));
            };
            self.verify_clause(clause)?;
        }
        Ok(())
    }

    fn verify_attribute(&self, path: &str, value: &Value) -> Result<(), String> {
        match match_field(path, &self.fields) {
            None => Err(format!("Invalid attribute: {path}")),
            Some(AllowListMatch::Exact) => match value {
                Value::Object(nested) => self.verify_nested(path, nested),
                _ => Ok(()),
            },
            Some(AllowListMatch::Prefix | AllowListMatch::Any) => Ok(()),
        }
    }

    /// Keys inside an exactly-matched attribute's object value.
    fn verify_nested(&self, parent: &str, nested: &Map<String, Value>) -> Result<(), String> {
        for (key, value) in nested {
            if is_operator(key) {
                // Field-level comparison operators (`$gt`, `$in`) take any value.
                if !self.operator_allowed(key) {
                    return Err(format!("Invalid operation: {parent}.{key}"));
                }
            } else {
                self.verify_attribute(&format!("{parent}.{key}"), value)?;
            }
        }
        Ok(())
    }
}
