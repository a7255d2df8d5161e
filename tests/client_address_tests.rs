// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client address resolution tests through the full router.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode},
};
use request_guard::config::Config;
use std::net::SocketAddr;
use tower::ServiceExt;

mod common;

fn request(headers: &[(&str, &str)], peer: Option<SocketAddr>) -> Request<Body> {
    let mut builder = Request::builder().uri("/api/v1/client-address");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let mut request = builder.body(Body::empty()).unwrap();
    if let Some(peer) = peer {
        request.extensions_mut().insert(ConnectInfo(peer));
    }
    request
}

async fn resolve(forwarded_count: usize, request: Request<Body>) -> String {
    let (app, _) = common::create_test_app_with(Config {
        http_forwarded_count: forwarded_count,
        ..Config::default()
    });

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    body["address"].as_str().unwrap().to_string()
}

fn peer() -> Option<SocketAddr> {
    Some(SocketAddr::from(([10, 0, 0, 5], 51000)))
}

#[tokio::test]
async fn test_real_ip_takes_precedence() {
    let req = request(
        &[("x-real-ip", "8.8.8.8"), ("x-forwarded-for", "1.1.1.1, 2.2.2.2")],
        peer(),
    );
    assert_eq!(resolve(1, req).await, "8.8.8.8");
}

#[tokio::test]
async fn test_forwarded_for_with_one_trusted_hop() {
    let req = request(&[("x-forwarded-for", "1.1.1.1, 2.2.2.2, 3.3.3.3")], peer());
    assert_eq!(resolve(1, req).await, "2.2.2.2");
}

#[tokio::test]
async fn test_forwarded_for_untrusted_without_hops() {
    let req = request(&[("x-forwarded-for", "1.1.1.1")], peer());
    assert_eq!(resolve(0, req).await, "10.0.0.5");
}

#[tokio::test]
async fn test_spoofed_chain_shorter_than_hops() {
    let req = request(&[("x-forwarded-for", "1.1.1.1")], peer());
    assert_eq!(resolve(3, req).await, "10.0.0.5");
}

#[tokio::test]
async fn test_no_headers_no_peer() {
    assert_eq!(resolve(1, request(&[], None)).await, "127.0.0.1");
}

#[tokio::test]
async fn test_forwarded_chain_split_across_header_lines() {
    let req = request(
        &[
            ("x-forwarded-for", "1.1.1.1, 2.2.2.2"),
            ("x-forwarded-for", "3.3.3.3"),
        ],
        peer(),
    );
    assert_eq!(resolve(2, req).await, "1.1.1.1");
}
