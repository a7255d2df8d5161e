// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules.

pub mod client_address;

pub use client_address::{attach_client_address, ClientAddress};
