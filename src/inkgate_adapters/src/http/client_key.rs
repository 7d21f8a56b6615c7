use std::net::SocketAddr;

use axum::{extract::ConnectInfo, http::HeaderMap};
use inkgate_core::ClientKey;

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Derive the rate limiting key for a request.
///
/// When the service runs behind a proxy the first `X-Forwarded-For` hop is
/// the originating client. Otherwise the socket peer is used, and requests
/// with neither share the `unknown` bucket.
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>, trust_proxy_headers: bool) -> ClientKey {
    if trust_proxy_headers {
        let forwarded = headers
            .get(FORWARDED_FOR)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|hop| !hop.is_empty());

        if let Some(hop) = forwarded {
            return ClientKey::new(hop);
        }
    }

    peer.map(|addr| ClientKey::new(addr.ip().to_string()))
        .unwrap_or_else(ClientKey::unknown)
}

pub(crate) fn peer_address(extensions: &axum::http::Extensions) -> Option<SocketAddr> {
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr)
}
