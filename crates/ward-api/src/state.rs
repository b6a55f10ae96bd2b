// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Application state shared across handlers.

use std::sync::Arc;

use ward_core::{
    AssignmentStore, AuthorizationStore, PasswordHasher, PermissionStore, RbacEvaluator,
    RoleStore, TokenService, UserStore,
};

use crate::config::GatewayConfig;
use crate::error::{ApiError, ApiResult};
use crate::proxy::ReviewProxy;

// =============================================================================
// AppState
// =============================================================================

/// State container passed to every handler via axum's state extraction.
///
/// All components are constructed once at startup and shared by reference;
/// nothing here is ambient or global.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration.
    pub config: Arc<GatewayConfig>,
    /// Token issuer/validator.
    pub tokens: Arc<TokenService>,
    /// RBAC evaluator.
    pub evaluator: Arc<RbacEvaluator>,
    /// Credential hasher.
    pub hasher: Arc<PasswordHasher>,
    /// User repository.
    pub users: Arc<dyn UserStore>,
    /// Role repository.
    pub roles: Arc<dyn RoleStore>,
    /// Permission repository.
    pub permissions: Arc<dyn PermissionStore>,
    /// Join-relation writes.
    pub assignments: Arc<dyn AssignmentStore>,
    /// Read-only authorization queries.
    pub authz: Arc<dyn AuthorizationStore>,
    /// Reverse proxy toward the review service.
    pub proxy: Arc<ReviewProxy>,
}

impl AppState {
    /// Creates a state builder.
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }
}

// =============================================================================
// AppStateBuilder
// =============================================================================

/// Builder for constructing [`AppState`].
#[derive(Default)]
pub struct AppStateBuilder {
    config: Option<GatewayConfig>,
    tokens: Option<Arc<TokenService>>,
    hasher: Option<Arc<PasswordHasher>>,
    users: Option<Arc<dyn UserStore>>,
    roles: Option<Arc<dyn RoleStore>>,
    permissions: Option<Arc<dyn PermissionStore>>,
    assignments: Option<Arc<dyn AssignmentStore>>,
    authz: Option<Arc<dyn AuthorizationStore>>,
}

impl AppStateBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn config(mut self, config: GatewayConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the token service.
    pub fn tokens(mut self, tokens: Arc<TokenService>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Sets the credential hasher.
    pub fn hasher(mut self, hasher: Arc<PasswordHasher>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    /// Wires every store trait from one implementation.
    pub fn store<S>(mut self, store: Arc<S>) -> Self
    where
        S: UserStore
            + RoleStore
            + PermissionStore
            + AssignmentStore
            + AuthorizationStore
            + 'static,
    {
        self.users = Some(store.clone());
        self.roles = Some(store.clone());
        self.permissions = Some(store.clone());
        self.assignments = Some(store.clone());
        self.authz = Some(store);
        self
    }

    /// Sets the user repository.
    pub fn users(mut self, users: Arc<dyn UserStore>) -> Self {
        self.users = Some(users);
        self
    }

    /// Sets the role repository.
    pub fn roles(mut self, roles: Arc<dyn RoleStore>) -> Self {
        self.roles = Some(roles);
        self
    }

    /// Sets the permission repository.
    pub fn permissions(mut self, permissions: Arc<dyn PermissionStore>) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// Sets the assignment repository.
    pub fn assignments(mut self, assignments: Arc<dyn AssignmentStore>) -> Self {
        self.assignments = Some(assignments);
        self
    }

    /// Sets the authorization query surface.
    pub fn authz(mut self, authz: Arc<dyn AuthorizationStore>) -> Self {
        self.authz = Some(authz);
        self
    }

    /// Builds the state, deriving unset components from the configuration.
    pub fn build(self) -> ApiResult<AppState> {
        let config = self.config.unwrap_or_default();

        let tokens = match self.tokens {
            Some(tokens) => tokens,
            None => Arc::new(
                TokenService::new(config.token.clone())
                    .map_err(|e| ApiError::internal(e.to_string()))?,
            ),
        };

        let hasher = self.hasher.unwrap_or_default();

        let missing = |component: &str| {
            ApiError::internal(format!("app state is missing the {component} store"))
        };
        let users = self.users.ok_or_else(|| missing("user"))?;
        let roles = self.roles.ok_or_else(|| missing("role"))?;
        let permissions = self.permissions.ok_or_else(|| missing("permission"))?;
        let assignments = self.assignments.ok_or_else(|| missing("assignment"))?;
        let authz = self.authz.ok_or_else(|| missing("authorization"))?;

        let evaluator = Arc::new(RbacEvaluator::new(authz.clone()));
        let proxy = Arc::new(ReviewProxy::new(
            config.review_upstream.clone(),
            config.review_prefix.clone(),
        ));

        Ok(AppState {
            config: Arc::new(config),
            tokens,
            evaluator,
            hasher,
            users,
            roles,
            permissions,
            assignments,
            authz,
            proxy,
        })
    }
}
