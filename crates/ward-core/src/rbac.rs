// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! RBAC evaluation.
//!
//! The evaluator answers "is this subject allowed to do X" by querying the
//! authorization store per request. Decisions are never cached, so role and
//! permission changes take effect immediately.
//!
//! Evaluation is fail-closed: any indeterminate state (a store error, an
//! unreachable database) resolves to [`Decision::Deny`], never to an
//! ambiguous allow. The evaluator therefore returns a plain [`Decision`]
//! rather than a `Result`; the failure is logged and the gate stays shut.

use std::sync::Arc;

use crate::store::AuthorizationStore;

// =============================================================================
// Decision
// =============================================================================

/// The outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The subject may proceed.
    Allow,
    /// The subject is denied.
    Deny,
}

impl Decision {
    /// Returns `true` for [`Decision::Allow`].
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

impl From<bool> for Decision {
    fn from(allowed: bool) -> Self {
        if allowed {
            Decision::Allow
        } else {
            Decision::Deny
        }
    }
}

// =============================================================================
// Capability
// =============================================================================

/// A required capability: a named role or a (resource, action) permission,
/// or a combinator over role names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    /// The subject must hold the named role.
    Role(String),
    /// The subject must hold a permission on a resource/action pair.
    Permission {
        /// The protected resource.
        resource: String,
        /// The action on the resource.
        action: String,
    },
    /// The subject must hold at least one of the named roles.
    AnyRole(Vec<String>),
    /// The subject must hold every one of the named roles.
    AllRoles(Vec<String>),
}

impl Capability {
    /// Convenience constructor for a single role requirement.
    pub fn role(name: impl Into<String>) -> Self {
        Self::Role(name.into())
    }

    /// Convenience constructor for a permission requirement.
    pub fn permission(resource: impl Into<String>, action: impl Into<String>) -> Self {
        Self::Permission {
            resource: resource.into(),
            action: action.into(),
        }
    }
}

// =============================================================================
// RbacEvaluator
// =============================================================================

/// Evaluates capability requirements against the authorization store.
///
/// Constructed once at startup over an injected store and shared by
/// reference with every consumer; it holds no mutable state.
#[derive(Clone)]
pub struct RbacEvaluator {
    store: Arc<dyn AuthorizationStore>,
}

impl RbacEvaluator {
    /// Creates an evaluator over the given store.
    pub fn new(store: Arc<dyn AuthorizationStore>) -> Self {
        Self { store }
    }

    /// Requires that the subject holds the named role.
    pub async fn require_role(&self, subject_id: i64, role_name: &str) -> Decision {
        match self.store.has_role(subject_id, role_name).await {
            Ok(held) => Decision::from(held),
            Err(e) => {
                tracing::warn!(subject_id, role_name, error = %e, "Role check failed, denying");
                Decision::Deny
            }
        }
    }

    /// Requires that the subject holds a permission on (resource, action).
    pub async fn require_permission(
        &self,
        subject_id: i64,
        resource: &str,
        action: &str,
    ) -> Decision {
        match self.store.has_permission(subject_id, resource, action).await {
            Ok(held) => Decision::from(held),
            Err(e) => {
                tracing::warn!(
                    subject_id,
                    resource,
                    action,
                    error = %e,
                    "Permission check failed, denying"
                );
                Decision::Deny
            }
        }
    }

    /// Requires that the subject holds at least one of the named roles.
    ///
    /// Short-circuits to allow on the first match. A store error during the
    /// scan denies the whole check. An empty list denies.
    pub async fn require_any_role(&self, subject_id: i64, role_names: &[String]) -> Decision {
        for role_name in role_names {
            match self.store.has_role(subject_id, role_name).await {
                Ok(true) => return Decision::Allow,
                Ok(false) => continue,
                Err(e) => {
                    tracing::warn!(subject_id, role_name = %role_name, error = %e,
                        "Role scan failed, denying");
                    return Decision::Deny;
                }
            }
        }
        Decision::Deny
    }

    /// Requires that the subject holds every one of the named roles.
    ///
    /// Short-circuits to deny on the first miss or store error. An empty
    /// list is vacuously satisfied.
    pub async fn require_all_roles(&self, subject_id: i64, role_names: &[String]) -> Decision {
        for role_name in role_names {
            match self.store.has_role(subject_id, role_name).await {
                Ok(true) => continue,
                Ok(false) => return Decision::Deny,
                Err(e) => {
                    tracing::warn!(subject_id, role_name = %role_name, error = %e,
                        "Role scan failed, denying");
                    return Decision::Deny;
                }
            }
        }
        Decision::Allow
    }

    /// Evaluates a [`Capability`] requirement.
    pub async fn check(&self, subject_id: i64, capability: &Capability) -> Decision {
        match capability {
            Capability::Role(name) => self.require_role(subject_id, name).await,
            Capability::Permission { resource, action } => {
                self.require_permission(subject_id, resource, action).await
            }
            Capability::AnyRole(names) => self.require_any_role(subject_id, names).await,
            Capability::AllRoles(names) => self.require_all_roles(subject_id, names).await,
        }
    }
}

impl std::fmt::Debug for RbacEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RbacEvaluator").finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
