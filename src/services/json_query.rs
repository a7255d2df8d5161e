// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Decoding of JSON-encoded `query`, `sort` and `fields` request parameters.

use crate::error::{AppError, Result};
use crate::models::{AllowList, JsonQuery, QueryObject};
use crate::services::query_guard::{is_valid_query, sanitize_query, QueryGuardError};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Raw parameters as they appear in the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonQueryParams {
    pub query: Option<String>,
    pub sort: Option<String>,
    pub fields: Option<String>,
}

/// What a caller may filter on, and which fields must never be returned.
#[derive(Debug, Clone, Default)]
pub struct JsonQueryOptions {
    pub allow_list: AllowList,
    pub hidden_fields: Vec<String>,
}

fn decode_object(raw: &str, name: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::BadRequest(format!(
            "Invalid {name} parameter: must be a JSON object"
        ))),
        Err(e) => Err(AppError::BadRequest(format!(
            "Invalid {name} parameter: {e}"
        ))),
    }
}

fn parse_sort(raw: &str) -> Result<Map<String, Value>> {
    let sort = decode_object(raw, "sort")?;
    for (key, direction) in &sort {
        if !matches!(direction.as_i64(), Some(1 | -1)) {
            return Err(AppError::BadRequest(format!(
                "Invalid sort parameter: direction for '{key}' must be 1 or -1"
            )));
        }
    }
    Ok(sort)
}

fn parse_fields(raw: Option<&str>, hidden_fields: &[String]) -> Result<Option<Map<String, Value>>> {
    let Some(raw) = raw else {
        if hidden_fields.is_empty() {
            return Ok(None);
        }
        return Ok(Some(exclusion_of(hidden_fields)));
    };

    let mut fields = decode_object(raw, "fields")?;
    let mut inclusion: Option<bool> = None;
    for (key, flag) in &fields {
        let include = match flag.as_i64() {
            Some(1) => true,
            Some(0) => false,
            _ => {
                return Err(AppError::BadRequest(format!(
                    "Invalid fields parameter: projection for '{key}' must be 0 or 1"
                )))
            }
        };
        if inclusion.is_some_and(|mode| mode != include) {
            return Err(AppError::BadRequest(
                "Invalid fields parameter: cannot mix inclusion and exclusion".to_string(),
            ));
        }
        inclusion = Some(include);
    }

    if inclusion == Some(true) {
        fields.retain(|key, _| !hidden_fields.contains(key));
        // An empty projection returns every field, hidden ones included.
        if fields.is_empty() {
            return Ok(Some(exclusion_of(hidden_fields)));
        }
    } else {
        for hidden in hidden_fields {
            fields.insert(hidden.clone(), Value::from(0));
        }
    }

    Ok(Some(fields))
}

fn exclusion_of(hidden_fields: &[String]) -> Map<String, Value> {
    hidden_fields
        .iter()
        .map(|field| (field.clone(), Value::from(0)))
        .collect()
}

fn parse_query(raw: Option<&str>, allow_list: &AllowList) -> Result<QueryObject> {
    let Some(raw) = raw else {
        return Ok(QueryObject::new());
    };

    let value: Value = serde_json::from_str(raw)
        .map_err(|e| AppError::BadRequest(format!("Invalid query parameter: {e}")))?;

    let validation = is_valid_query(
        &value,
        allow_list.fields.as_slice(),
        allow_list.operators.as_slice(),
    )?;
    if !validation.valid {
        tracing::warn!(errors = ?validation.errors, "Rejected query parameter");
        return Err(AppError::BadRequest(format!(
            "Invalid query parameter provided: {}",
            validation.errors.join(", ")
        )));
    }

    match sanitize_query(value, allow_list.operators.as_slice()) {
        Value::Object(map) => Ok(map),
        _ => Err(QueryGuardError::NotAnObject.into()),
    }
}

/// Decode and validate `query`, `sort` and `fields`.
///
/// The returned query has already passed the allow-list and been sanitized.
/// Hidden fields are never projected in.
pub fn parse_json_query(params: &JsonQueryParams, options: &JsonQueryOptions) -> Result<JsonQuery> {
    let sort = params.sort.as_deref().map(parse_sort).transpose()?;
    let fields = parse_fields(params.fields.as_deref(), &options.hidden_fields)?;
    let query = parse_query(params.query.as_deref(), &options.allow_list)?;

    Ok(JsonQuery {
        sort,
        fields,
        query,
    })
}
