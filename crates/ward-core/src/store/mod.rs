// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authorization store and repositories.
//!
//! The store is split into capability traits, each with one canonical
//! signature set:
//!
//! - [`AuthorizationStore`]: the read-only query surface consumed by the
//!   RBAC evaluator
//! - [`AssignmentStore`]: writes on the user-role and role-permission
//!   join relations
//! - [`UserStore`], [`RoleStore`], [`PermissionStore`]: entity CRUD
//!
//! All queries are independent, auto-committing statements; uniqueness on
//! the join relations is pushed to storage-level conflict handling, so no
//! multi-statement transactions are required.

mod pg;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::model::{Permission, Role, User};

pub use pg::PgStore;

/// Embedded migrations for the auth schema.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

// =============================================================================
// AuthorizationStore
// =============================================================================

/// Read-only query surface over the user/role/permission relations.
///
/// Plural queries return an empty collection when nothing matches; only
/// connectivity or query failures produce errors. The boolean queries are
/// existence checks and never materialize the full collection.
#[async_trait]
pub trait AuthorizationStore: Send + Sync {
    /// Returns the roles directly assigned to a user.
    async fn roles_of_user(&self, user_id: i64) -> StoreResult<Vec<Role>>;

    /// Returns a user's effective permissions: the deduplicated union of
    /// the permission sets of every role assigned to the user.
    async fn permissions_of_user(&self, user_id: i64) -> StoreResult<Vec<Permission>>;

    /// Returns `true` if the user is assigned the named role.
    async fn has_role(&self, user_id: i64, role_name: &str) -> StoreResult<bool>;

    /// Returns `true` if any of the user's roles grants the
    /// (resource, action) permission.
    async fn has_permission(
        &self,
        user_id: i64,
        resource: &str,
        action: &str,
    ) -> StoreResult<bool>;
}

// =============================================================================
// AssignmentStore
// =============================================================================

/// Writes on the join relations.
///
/// Assignment inserts are idempotent: assigning an already-assigned pair is
/// a no-op, not an error. Removals report not-found when nothing was
/// deleted.
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    /// Assigns a role to a user (no-op if already assigned).
    async fn assign_role(&self, user_id: i64, role_id: i64) -> StoreResult<()>;

    /// Removes a role from a user.
    async fn remove_role(&self, user_id: i64, role_id: i64) -> StoreResult<()>;

    /// Grants a permission to a role (no-op if already granted).
    async fn grant_permission(&self, role_id: i64, permission_id: i64) -> StoreResult<()>;

    /// Revokes a permission from a role.
    async fn revoke_permission(&self, role_id: i64, permission_id: i64) -> StoreResult<()>;
}

// =============================================================================
// UserStore
// =============================================================================

/// CRUD surface over user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates a user with an already-hashed credential.
    async fn create(&self, username: &str, email: &str, password_hash: &str)
        -> StoreResult<User>;

    /// Fetches a user by id.
    async fn by_id(&self, id: i64) -> StoreResult<User>;

    /// Fetches a user by email. Used by login; includes the stored hash.
    async fn by_email(&self, email: &str) -> StoreResult<User>;

    /// Lists all users.
    async fn all(&self) -> StoreResult<Vec<User>>;

    /// Hard-deletes a user.
    async fn delete(&self, id: i64) -> StoreResult<()>;
}

// =============================================================================
// RoleStore
// =============================================================================

/// CRUD surface over role records.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Fetches a role by id.
    async fn by_id(&self, id: i64) -> StoreResult<Role>;

    /// Lists all roles.
    async fn all(&self) -> StoreResult<Vec<Role>>;

    /// Creates a role.
    async fn create(&self, name: &str, description: &str) -> StoreResult<Role>;

    /// Updates a role's name and description.
    async fn update(&self, id: i64, name: &str, description: &str) -> StoreResult<Role>;

    /// Hard-deletes a role.
    async fn delete(&self, id: i64) -> StoreResult<()>;
}

// =============================================================================
// PermissionStore
// =============================================================================

/// CRUD surface over permission records.
#[async_trait]
pub trait PermissionStore: Send + Sync {
    /// Fetches a permission by id.
    async fn by_id(&self, id: i64) -> StoreResult<Permission>;

    /// Lists all permissions.
    async fn all(&self) -> StoreResult<Vec<Permission>>;

    /// Lists the permissions granted to a role.
    async fn of_role(&self, role_id: i64) -> StoreResult<Vec<Permission>>;

    /// Creates a permission.
    async fn create(
        &self,
        name: &str,
        description: &str,
        resource: &str,
        action: &str,
    ) -> StoreResult<Permission>;

    /// Updates a permission.
    async fn update(
        &self,
        id: i64,
        name: &str,
        description: &str,
        resource: &str,
        action: &str,
    ) -> StoreResult<Permission>;

    /// Hard-deletes a permission.
    async fn delete(&self, id: i64) -> StoreResult<()>;
}
