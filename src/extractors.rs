// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Axum extractors for normalized request values.

use crate::models::{PaginationRequest, PaginationResult};
use crate::services::normalize_pagination;
use crate::AppState;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;

/// Raw pagination query parameters.
#[derive(Debug, Deserialize)]
struct PaginationParams {
    offset: Option<String>,
    count: Option<String>,
}

/// Pagination normalized against the configured limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination(pub PaginationResult);

impl FromRequestParts<Arc<AppState>> for Pagination {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        // Unusable query strings degrade to defaults like any other bad value.
        let request = match Query::<PaginationParams>::from_request_parts(parts, state).await {
            Ok(Query(params)) => PaginationRequest::new(
                params.offset.map(Into::into),
                params.count.map(Into::into),
            ),
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "Ignoring malformed pagination query");
                PaginationRequest::default()
            }
        };

        Ok(Pagination(normalize_pagination(
            &request,
            &state.config.pagination_limits(),
        )))
    }
}
