// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request normalization helpers.

pub mod client_address;
pub mod json_query;
pub mod pagination;
pub mod query_guard;

pub use client_address::{resolve_client_address, ClientTransport};
pub use json_query::{parse_json_query, JsonQueryOptions, JsonQueryParams};
pub use pagination::normalize_pagination;
pub use query_guard::{clean_operators, is_valid_query, remove_dangerous_props, QueryGuardError};
