// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Identity-propagation reverse proxy toward the review service.
//!
//! Requests are passed through mostly unmodified: method, body, query
//! string, and headers are preserved, with the hop-by-hop set removed. The
//! one trust-sensitive rewrite: any caller-supplied `X-User-ID` header is
//! stripped before the value derived from the validated token is injected,
//! so the upstream only ever sees the gateway's own assertion.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, Response},
};

use crate::context::AuthContext;
use crate::error::{ApiError, ApiResult};
use crate::extractors::Auth;
use crate::state::AppState;

/// The trusted identity header injected toward the upstream.
pub const X_USER_ID: &str = "x-user-id";

/// Cap on buffered proxy bodies.
const MAX_PROXY_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Hop-by-hop headers that must not be forwarded in either direction.
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-connection",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

// =============================================================================
// ReviewProxy
// =============================================================================

/// Reverse proxy that forwards authenticated requests to the review service.
#[derive(Debug, Clone)]
pub struct ReviewProxy {
    client: reqwest::Client,
    upstream: String,
    strip_prefix: String,
}

impl ReviewProxy {
    /// Creates a proxy toward the given upstream base URL. `strip_prefix`
    /// is removed from the front of the inbound path before forwarding.
    pub fn new(upstream: impl Into<String>, strip_prefix: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            upstream: upstream.into(),
            strip_prefix: strip_prefix.into(),
        }
    }

    /// Forwards a request, injecting the authenticated subject id.
    pub async fn forward(
        &self,
        ctx: &AuthContext,
        req: Request,
    ) -> ApiResult<Response<Body>> {
        let (parts, body) = req.into_parts();

        let bytes = axum::body::to_bytes(body, MAX_PROXY_BODY_BYTES)
            .await
            .map_err(|e| ApiError::validation(format!("failed to read request body: {e}")))?;

        let mut url = format!(
            "{}{}",
            self.upstream.trim_end_matches('/'),
            strip_path(parts.uri.path(), &self.strip_prefix)
        );
        if let Some(query) = parts.uri.query() {
            url.push('?');
            url.push_str(query);
        }

        let mut headers = filter_request_headers(&parts.headers);
        headers.insert(
            HeaderName::from_static(X_USER_ID),
            HeaderValue::from_str(&ctx.subject_id.to_string())
                .map_err(|e| ApiError::internal(e.to_string()))?,
        );

        tracing::debug!(
            subject_id = ctx.subject_id,
            method = %parts.method,
            url = %url,
            "Forwarding to review service"
        );

        let upstream_response = self
            .client
            .request(parts.method, &url)
            .headers(headers)
            .body(bytes)
            .send()
            .await
            .map_err(|e| ApiError::upstream(e.to_string()))?;

        let status = upstream_response.status();
        let response_headers = filter_response_headers(upstream_response.headers());
        let response_bytes = upstream_response
            .bytes()
            .await
            .map_err(|e| ApiError::upstream(e.to_string()))?;

        let mut response = Response::builder()
            .status(status)
            .body(Body::from(response_bytes))
            .map_err(|e| ApiError::internal(e.to_string()))?;
        *response.headers_mut() = response_headers;

        Ok(response)
    }
}

/// ANY /reviews, ANY /reviews/{*rest}
///
/// Gateway handler forwarding authenticated traffic to the review service.
pub async fn forward_review(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    req: Request,
) -> ApiResult<Response<Body>> {
    state.proxy.forward(&ctx, req).await
}

// =============================================================================
// Helper Functions
// =============================================================================

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Strips the configured prefix, keeping the path rooted.
fn strip_path(path: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return path.to_string();
    }
    let stripped = path.strip_prefix(prefix).unwrap_or(path);
    if stripped.starts_with('/') {
        stripped.to_string()
    } else {
        format!("/{stripped}")
    }
}

/// Copies request headers, dropping hop-by-hop headers, connection-specific
/// fields, and any caller-supplied identity header.
fn filter_request_headers(headers: &HeaderMap) -> HeaderMap {
    let mut filtered = HeaderMap::new();
    for (name, value) in headers {
        if is_hop_by_hop(name) {
            continue;
        }
        match name.as_str() {
            "host" | "content-length" | X_USER_ID => continue,
            _ => {
                filtered.append(name.clone(), value.clone());
            }
        }
    }
    filtered
}

/// Copies response headers, dropping hop-by-hop headers and lengths that
/// no longer apply to the re-framed body.
fn filter_response_headers(headers: &HeaderMap) -> HeaderMap {
    let mut filtered = HeaderMap::new();
    for (name, value) in headers {
        if is_hop_by_hop(name) || name.as_str() == "content-length" {
            continue;
        }
        filtered.append(name.clone(), value.clone());
    }
    filtered
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_path() {
        assert_eq!(strip_path("/reviews/5", ""), "/reviews/5");
        assert_eq!(strip_path("/api/reviews/5", "/api"), "/reviews/5");
        assert_eq!(strip_path("/reviews", "/api"), "/reviews");
    }

    #[test]
    fn test_request_filter_strips_spoofed_identity() {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", HeaderValue::from_static("attacker"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers.insert("host", HeaderValue::from_static("gateway.internal"));
        headers.insert("connection", HeaderValue::from_static("keep-alive"));

        let filtered = filter_request_headers(&headers);

        assert!(filtered.get("x-user-id").is_none());
        assert!(filtered.get("host").is_none());
        assert!(filtered.get("connection").is_none());
        assert_eq!(
            filtered.get("content-type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_request_filter_preserves_ordinary_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc"));
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let filtered = filter_request_headers(&headers);

        assert_eq!(filtered.get("authorization").unwrap(), "Bearer abc");
        assert_eq!(filtered.get("accept").unwrap(), "application/json");
    }

    #[test]
    fn test_response_filter_strips_framing_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("transfer-encoding", HeaderValue::from_static("chunked"));
        headers.insert("content-length", HeaderValue::from_static("42"));
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let filtered = filter_response_headers(&headers);

        assert!(filtered.get("transfer-encoding").is_none());
        assert!(filtered.get("content-length").is_none());
        assert_eq!(
            filtered.get("content-type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_only_token_derived_identity_is_injected() {
        // Simulates the full header rewrite the proxy performs.
        let mut inbound = HeaderMap::new();
        inbound.insert("x-user-id", HeaderValue::from_static("attacker"));

        let mut outbound = filter_request_headers(&inbound);
        outbound.insert(
            HeaderName::from_static(X_USER_ID),
            HeaderValue::from_static("7"),
        );

        let values: Vec<_> = outbound.get_all("x-user-id").iter().collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0], "7");
    }
}
