// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use request_guard::error::AppError;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_bad_request_body() {
    let response = AppError::BadRequest("Invalid sort parameter".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        common::body_json(response).await,
        json!({"error": "bad_request", "details": "Invalid sort parameter"})
    );
}

#[tokio::test]
async fn test_not_found_body() {
    let response = AppError::NotFound("/nope".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        common::body_json(response).await,
        json!({"error": "not_found", "details": "/nope"})
    );
}

#[tokio::test]
async fn test_internal_error_hides_details() {
    let response = AppError::Internal(anyhow::anyhow!("secret detail")).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        common::body_json(response).await,
        json!({"error": "internal_error"})
    );
}
