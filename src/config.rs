// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Values are read once at startup into an immutable snapshot shared by
//! all requests.

use crate::models::{AllowList, PaginationLimits};
use crate::services::json_query::JsonQueryOptions;
use std::env;
use std::str::FromStr;

/// Environment variable holding the number of trusted proxy hops.
pub const HTTP_FORWARDED_COUNT: &str = "HTTP_FORWARDED_COUNT";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    // --- Pagination ---
    /// Maximum page size (raised to 100 if configured lower)
    pub api_upper_limit: i64,
    /// Default page size (raised to 50 if configured lower)
    pub api_default_count: i64,
    /// Whether `count=0` returns everything
    pub api_allow_infinite_count: bool,

    // --- Client address ---
    /// Number of trusted reverse proxies in front of the service
    pub http_forwarded_count: usize,

    // --- Query guard ---
    /// Attribute paths clients may filter on
    pub query_fields: Vec<String>,
    /// Top-level operators clients may use
    pub query_operators: Vec<String>,
    /// Fields that are never projected into responses
    pub hidden_fields: Vec<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            api_upper_limit: 100,
            api_default_count: 50,
            api_allow_infinite_count: false,
            http_forwarded_count: 0,
            query_fields: vec!["*".to_string()],
            query_operators: vec!["$or".to_string(), "$and".to_string()],
            hidden_fields: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Ok(Self {
            port: parse_var("PORT", defaults.port)?,
            api_upper_limit: parse_var("API_UPPER_LIMIT", defaults.api_upper_limit)?,
            api_default_count: parse_var("API_DEFAULT_COUNT", defaults.api_default_count)?,
            api_allow_infinite_count: parse_var(
                "API_ALLOW_INFINITE_COUNT",
                defaults.api_allow_infinite_count,
            )?,
            http_forwarded_count: parse_var(HTTP_FORWARDED_COUNT, defaults.http_forwarded_count)?,
            query_fields: list_var("API_QUERY_FIELDS").unwrap_or(defaults.query_fields),
            query_operators: list_var("API_QUERY_OPERATORS").unwrap_or(defaults.query_operators),
            hidden_fields: list_var("API_HIDDEN_FIELDS").unwrap_or(defaults.hidden_fields),
        })
    }

    pub fn pagination_limits(&self) -> PaginationLimits {
        PaginationLimits {
            upper_limit: self.api_upper_limit,
            default_count: self.api_default_count,
            allow_infinite: self.api_allow_infinite_count,
        }
    }

    pub fn allow_list(&self) -> AllowList {
        AllowList {
            fields: self.query_fields.clone(),
            operators: self.query_operators.clone(),
        }
    }

    pub fn json_query_options(&self) -> JsonQueryOptions {
        JsonQueryOptions {
            allow_list: self.allow_list(),
            hidden_fields: self.hidden_fields.clone(),
        }
    }
}

/// Read the trusted proxy hop count from the environment at call time.
///
/// Missing or unparseable values mean no proxies are trusted.
pub fn forwarded_hop_count_from_env() -> usize {
    env::var(HTTP_FORWARDED_COUNT)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

fn list_var(name: &str) -> Option<Vec<String>> {
    env::var(name).ok().map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
