// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! RBAC authorization middleware.
//!
//! Each layer instance carries one [`Capability`] requirement and evaluates
//! it against the store on every request; decisions are never cached, so
//! role changes take effect immediately.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};
use ward_core::{Capability, RbacEvaluator};

use crate::context::AuthContext;
use crate::error::ApiError;

// =============================================================================
// RequireLayer
// =============================================================================

/// Layer enforcing a capability requirement on the authenticated subject.
///
/// Must run after [`crate::middleware::AuthLayer`]: a request with no
/// authenticated context is rejected with 401 rather than evaluated.
#[derive(Clone)]
pub struct RequireLayer {
    evaluator: Arc<RbacEvaluator>,
    capability: Arc<Capability>,
}

impl RequireLayer {
    /// Requires a single named role.
    pub fn role(evaluator: Arc<RbacEvaluator>, name: impl Into<String>) -> Self {
        Self::new(evaluator, Capability::role(name))
    }

    /// Requires a permission on a (resource, action) pair.
    pub fn permission(
        evaluator: Arc<RbacEvaluator>,
        resource: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self::new(evaluator, Capability::permission(resource, action))
    }

    /// Requires at least one of the named roles.
    pub fn any_role(evaluator: Arc<RbacEvaluator>, names: Vec<String>) -> Self {
        Self::new(evaluator, Capability::AnyRole(names))
    }

    /// Requires every one of the named roles.
    pub fn all_roles(evaluator: Arc<RbacEvaluator>, names: Vec<String>) -> Self {
        Self::new(evaluator, Capability::AllRoles(names))
    }

    fn new(evaluator: Arc<RbacEvaluator>, capability: Capability) -> Self {
        Self {
            evaluator,
            capability: Arc::new(capability),
        }
    }
}

impl<S> Layer<S> for RequireLayer {
    type Service = RequireMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequireMiddleware {
            inner,
            evaluator: self.evaluator.clone(),
            capability: self.capability.clone(),
        }
    }
}

// =============================================================================
// RequireMiddleware
// =============================================================================

/// Middleware enforcing one capability requirement.
#[derive(Clone)]
pub struct RequireMiddleware<S> {
    inner: S,
    evaluator: Arc<RbacEvaluator>,
    capability: Arc<Capability>,
}

impl<S> Service<Request<Body>> for RequireMiddleware<S>
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

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let evaluator = self.evaluator.clone();
        let capability = self.capability.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let ctx = match req.extensions().get::<AuthContext>() {
                Some(ctx) => ctx.clone(),
                None => {
                    tracing::warn!("No auth context found, denying access");
                    return Ok(
                        ApiError::authentication("Authentication required").into_response()
                    );
                }
            };

            if evaluator.check(ctx.subject_id, &capability).await.is_allow() {
                inner.call(req).await
            } else {
                tracing::warn!(
                    subject_id = ctx.subject_id,
                    required = ?capability,
                    "Authorization denied"
                );
                Ok(ApiError::authorization("Insufficient permissions").into_response())
            }
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
