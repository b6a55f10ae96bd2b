// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Bearer-token authentication middleware.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::{header, Request},
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};
use ward_core::TokenService;

use crate::context::AuthContext;
use crate::error::ApiError;

// =============================================================================
// AuthLayer
// =============================================================================

/// Layer for bearer-token authentication.
///
/// Wraps services so that every request must carry a valid token in the
/// `Authorization` header. Validation failure short-circuits with 401; on
/// success the verified identity is attached to the request as an
/// [`AuthContext`].
#[derive(Clone)]
pub struct AuthLayer {
    tokens: Arc<TokenService>,
}

impl AuthLayer {
    /// Creates an auth layer over the given token service.
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            tokens: self.tokens.clone(),
        }
    }
}

// =============================================================================
// AuthMiddleware
// =============================================================================

/// Middleware performing bearer-token authentication.
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    tokens: Arc<TokenService>,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let tokens = self.tokens.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    tracing::debug!("No authorization token provided");
                    return Ok(
                        ApiError::authentication("No authorization token provided")
                            .into_response(),
                    );
                }
            };

            let claims = match tokens.validate(&token) {
                Ok(claims) => claims,
                Err(e) => {
                    tracing::debug!(error = %e, "Token validation failed");
                    return Ok(ApiError::from(e).into_response());
                }
            };

            let subject_id = match claims.subject_id() {
                Ok(id) => id,
                Err(e) => {
                    tracing::debug!(error = %e, "Token subject is not a valid user id");
                    return Ok(ApiError::from(e).into_response());
                }
            };

            req.extensions_mut()
                .insert(AuthContext::new(subject_id, &claims));

            inner.call(req).await
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token<B>(req: &Request<B>) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer ").map(|s| s.to_string()))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use axum::http::{HeaderValue, StatusCode};
    use tower::ServiceExt;
    use ward_core::TokenConfig;

    use super::*;

    fn test_tokens() -> Arc<TokenService> {
        Arc::new(
            TokenService::new(TokenConfig::new(
                "test-secret-key-that-is-long-enough-for-testing",
            ))
            .unwrap(),
        )
    }

    fn echo_subject_service() -> impl Service<
        Request<Body>,
        Response = Response,
        Error = std::convert::Infallible,
        Future = impl Future<Output = Result<Response, std::convert::Infallible>> + Send,
    > + Clone
           + Send {
        tower::service_fn(|req: Request<Body>| async move {
            let subject = req
                .extensions()
                .get::<AuthContext>()
                .map(|ctx| ctx.subject_id)
                .unwrap_or(-1);
            Ok(Response::new(Body::from(subject.to_string())))
        })
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut req = Request::builder().uri("/test").body(Body::empty()).unwrap();

        assert!(extract_bearer_token(&req).is_none());

        req.headers_mut()
            .insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(extract_bearer_token(&req).is_none());

        req.headers_mut().insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer mytoken123"),
        );
        assert_eq!(extract_bearer_token(&req), Some("mytoken123".to_string()));
    }

    #[tokio::test]
    async fn test_missing_token_is_401() {
        let mut service = AuthLayer::new(test_tokens()).layer(echo_subject_service());

        let req = Request::builder().uri("/test").body(Body::empty()).unwrap();
        let response = service.ready().await.unwrap().call(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_token_is_401() {
        let mut service = AuthLayer::new(test_tokens()).layer(echo_subject_service());

        let req = Request::builder()
            .uri("/test")
            .header(header::AUTHORIZATION, "Bearer not.a.token")
            .body(Body::empty())
            .unwrap();
        let response = service.ready().await.unwrap().call(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_attaches_context() {
        let tokens = test_tokens();
        let token = tokens.issue(7, "admin@example.com").unwrap();
        let mut service = AuthLayer::new(tokens).layer(echo_subject_service());

        let req = Request::builder()
            .uri("/test")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let response = service.ready().await.unwrap().call(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        assert_eq!(&body[..], b"7");
    }
}
