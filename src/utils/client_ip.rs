//! Client address resolution from HTTP request data.

use axum::http::{HeaderMap, HeaderName};
use std::net::SocketAddr;

const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");
const X_REAL_IP: HeaderName = HeaderName::from_static("x-real-ip");

/// Resolves the address recorded for a visit.
///
/// Without a trusted proxy in front of the service only the socket peer
/// address is used. With `behind_proxy` the first `X-Forwarded-For` entry wins,
/// then `X-Real-IP`, then the peer address.
///
/// Returns an empty string when nothing is available.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// assert_eq!(resolve_client_ip(&headers, None, true), "203.0.113.7");
/// assert_eq!(resolve_client_ip(&headers, None, false), "");
/// ```
pub fn resolve_client_ip(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    behind_proxy: bool,
) -> String {
    if behind_proxy {
        let forwarded = header_str(headers, &X_FORWARDED_FOR)
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = forwarded.or_else(|| header_str(headers, &X_REAL_IP)) {
            return ip.to_string();
        }
    }

    peer.map(|addr| addr.ip().to_string()).unwrap_or_default()
}

/// Returns a header value as trimmed, non-empty UTF-8.
pub fn header_str<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
