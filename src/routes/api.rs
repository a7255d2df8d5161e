// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes exposing the normalization helpers.

use crate::error::Result;
use crate::extractors::Pagination;
use crate::middleware::ClientAddress;
use crate::models::{JsonQuery, PaginationResult, QueryValidation};
use crate::services::json_query::{parse_json_query, JsonQueryParams};
use crate::services::query_guard::is_valid_query;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/pagination", get(get_pagination))
        .route("/api/v1/query", get(get_query))
        .route("/api/v1/query/validate", post(validate_query))
        .route("/api/v1/client-address", get(get_client_address))
}

// ─── Pagination ──────────────────────────────────────────────

/// Normalized pagination for the request's `offset`/`count`.
async fn get_pagination(Pagination(page): Pagination) -> Json<PaginationResult> {
    Json(page)
}

// ─── Query Guard ─────────────────────────────────────────────

#[derive(Deserialize)]
struct ValidateRequest {
    query: Value,
    /// Overrides the configured field allow-list
    fields: Option<Vec<String>>,
    /// Overrides the configured operator allow-list
    operators: Option<Vec<String>>,
}

/// Validate a filter object against an allow-list.
///
/// Policy violations are a normal `200` with `valid: false`; a non-object
/// query is a `400`.
async fn validate_query(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ValidateRequest>,
) -> Result<Json<QueryValidation>> {
    let fields = body.fields.unwrap_or_else(|| state.config.query_fields.clone());
    let operators = body
        .operators
        .unwrap_or_else(|| state.config.query_operators.clone());

    let validation = is_valid_query(&body.query, fields.as_slice(), operators.as_slice())?;

    tracing::debug!(
        valid = validation.valid,
        errors = ?validation.errors,
        "Validated query"
    );

    Ok(Json(validation))
}

/// Decode `query`, `sort` and `fields` against the configured allow-list.
async fn get_query(
    State(state): State<Arc<AppState>>,
    Query(params): Query<JsonQueryParams>,
) -> Result<Json<JsonQuery>> {
    let parsed = parse_json_query(&params, &state.config.json_query_options())?;
    Ok(Json(parsed))
}

// ─── Client Address ──────────────────────────────────────────

#[derive(Serialize)]
pub struct ClientAddressResponse {
    pub address: String,
}

async fn get_client_address(
    Extension(ClientAddress(address)): Extension<ClientAddress>,
) -> Json<ClientAddressResponse> {
    Json(ClientAddressResponse { address })
}
