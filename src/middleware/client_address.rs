// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client address middleware.

use crate::services::client_address::{resolve_client_address, ClientTransport};
use crate::AppState;
use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::sync::Arc;

/// Resolved originating client address, attached to every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddress(pub String);

/// Resolve the client address and insert it as a request extension.
///
/// The address is also recorded on the enclosing request span, which must
/// declare a `client_address` field (see `routes::make_request_span`).
///
/// The socket address comes from `ConnectInfo`, so the server must be started
/// with `into_make_service_with_connect_info::<SocketAddr>()`.
pub async fn attach_client_address(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let transport = ClientTransport {
        socket_remote_address: request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string()),
        connection_remote_address: None,
    };

    let address = resolve_client_address(
        request.headers(),
        &transport,
        state.config.http_forwarded_count,
    );

    tracing::Span::current().record("client_address", address.as_str());
    tracing::debug!(client_address = %address, "Resolved client address");
    request.extensions_mut().insert(ClientAddress(address));

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::Body;
    use axum::{routing::get, Extension, Router};
    use tower::ServiceExt; // for oneshot

    fn app(http_forwarded_count: usize) -> Router {
        let state = Arc::new(AppState {
            config: Config {
                http_forwarded_count,
                ..Config::default()
            },
        });

        Router::new()
            .route(
                "/",
                get(|Extension(ClientAddress(addr)): Extension<ClientAddress>| async move { addr }),
            )
            .layer(axum::middleware::from_fn_with_state(
                state,
                attach_client_address,
            ))
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_uses_connect_info() {
        let mut request = Request::builder().uri("/").body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 20], 40000))));

        let response = app(0).oneshot(request).await.unwrap();
        assert_eq!(body_string(response).await, "192.168.1.20");
    }

    #[tokio::test]
    async fn test_honors_forwarded_count() {
        let request = Request::builder()
            .uri("/")
            .header("x-forwarded-for", "1.1.1.1, 2.2.2.2, 3.3.3.3")
            .body(Body::empty())
            .unwrap();

        let response = app(1).oneshot(request).await.unwrap();
        assert_eq!(body_string(response).await, "2.2.2.2");
    }

    #[tokio::test]
    async fn test_defaults_to_loopback() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app(1).oneshot(request).await.unwrap();
        assert_eq!(body_string(response).await, "127.0.0.1");
    }
}
