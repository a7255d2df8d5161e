// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for request normalization.

pub mod pagination;
pub mod query;

pub use pagination::{PaginationLimits, PaginationRequest, PaginationResult, RawNumber};
pub use query::{AllowList, AllowListMatch, FieldPattern, JsonQuery, QueryObject, QueryValidation};
