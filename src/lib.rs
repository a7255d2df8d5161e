// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request-Guard: request normalization helpers for HTTP APIs
//!
//! This crate provides pagination bounds clamping, query allow-list
//! validation and proxy-aware client address resolution, plus a thin axum
//! surface exposing them.

pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;

/// Shared application state.
pub struct AppState {
    pub config: Config,
}
