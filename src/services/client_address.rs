// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client address resolution behind trusted reverse proxies.
//!
//! Priority, first match wins:
//! 1. `X-Real-IP`, verbatim
//! 2. `X-Forwarded-For`, walking back `forwarded_hop_count` trusted hops
//!    from the rightmost entry (hop count 0 ignores the header)
//! 3. socket remote address
//! 4. connection remote address
//! 5. `127.0.0.1`
//!
//! The result is not validated as an IP address.

use axum::http::HeaderMap;

pub const X_REAL_IP: &str = "x-real-ip";
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
/// Returned when nothing else identifies the peer.
pub const LOOPBACK_ADDRESS: &str = "127.0.0.1";

/// Addresses known to the transport layer for the current request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientTransport {
    pub socket_remote_address: Option<String>,
    pub connection_remote_address: Option<String>,
}

impl ClientTransport {
    pub fn from_socket(address: impl Into<String>) -> Self {
        Self {
            socket_remote_address: Some(address.into()),
            connection_remote_address: None,
        }
    }

    fn remote_address(&self) -> String {
        self.socket_remote_address
            .as_deref()
            .or(self.connection_remote_address.as_deref())
            .unwrap_or(LOOPBACK_ADDRESS)
            .to_string()
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
}

/// All `X-Forwarded-For` lines joined into one comma-separated chain.
///
/// Proxies may append their own header line instead of extending the first.
fn forwarded_chain(headers: &HeaderMap) -> Option<String> {
    let lines: Vec<&str> = headers
        .get_all(X_FORWARDED_FOR)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(","))
    }
}

/// Resolve the originating client address for a request.
pub fn resolve_client_address(
    headers: &HeaderMap,
    transport: &ClientTransport,
    forwarded_hop_count: usize,
) -> String {
    if let Some(real_ip) = header_str(headers, X_REAL_IP) {
        return real_ip.to_string();
    }

    if let Some(forwarded_for) = forwarded_chain(headers) {
        if forwarded_hop_count == 0 {
            return transport.remote_address();
        }

        let entries: Vec<&str> = forwarded_for.split(',').map(str::trim).collect();
        return match entries
            .len()
            .checked_sub(forwarded_hop_count)
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| entries.get(index))
        {
            Some(entry) => entry.to_string(),
            None => {
                tracing::debug!(
                    entries = entries.len(),
                    hops = forwarded_hop_count,
                    "X-Forwarded-For shorter than trusted hop count, using transport address"
                );
                transport.remote_address()
            }
        };
    }

    transport.remote_address()
}
