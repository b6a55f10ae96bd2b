// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Postgres implementation of the store traits.
//!
//! The RBAC queries all walk the same relational join:
//! `users -> user_roles -> roles -> role_permissions -> permissions`.
//! Boolean checks are `COUNT(*)` existence queries rather than
//! materializations of the full collection.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};
use crate::model::{Permission, Role, User};
use crate::store::{AssignmentStore, AuthorizationStore, PermissionStore, RoleStore, UserStore};

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at, updated_at";
const ROLE_COLUMNS: &str = "id, name, description, created_at, updated_at";
const PERMISSION_COLUMNS: &str = "id, name, description, resource, action, created_at, updated_at";

// =============================================================================
// PgStore
// =============================================================================

/// Postgres-backed store implementing every store trait over one pool.
///
/// The pool is the only shared state; every method issues an independent,
/// auto-committing statement.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Creates a store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// =============================================================================
// AuthorizationStore
// =============================================================================

#[async_trait]
impl AuthorizationStore for PgStore {
    async fn roles_of_user(&self, user_id: i64) -> StoreResult<Vec<Role>> {
        let roles = sqlx::query_as::<_, Role>(
            "SELECT r.id, r.name, r.description, r.created_at, r.updated_at \
             FROM roles r \
             JOIN user_roles ur ON r.id = ur.role_id \
             WHERE ur.user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(roles)
    }

    async fn permissions_of_user(&self, user_id: i64) -> StoreResult<Vec<Permission>> {
        let permissions = sqlx::query_as::<_, Permission>(
            "SELECT DISTINCT p.id, p.name, p.description, p.resource, p.action, \
                    p.created_at, p.updated_at \
             FROM permissions p \
             JOIN role_permissions rp ON p.id = rp.permission_id \
             JOIN user_roles ur ON rp.role_id = ur.role_id \
             WHERE ur.user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(permissions)
    }

    async fn has_role(&self, user_id: i64, role_name: &str) -> StoreResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) \
             FROM roles r \
             JOIN user_roles ur ON r.id = ur.role_id \
             WHERE ur.user_id = $1 AND r.name = $2",
        )
        .bind(user_id)
        .bind(role_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    async fn has_permission(
        &self,
        user_id: i64,
        resource: &str,
        action: &str,
    ) -> StoreResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) \
             FROM permissions p \
             JOIN role_permissions rp ON p.id = rp.permission_id \
             JOIN user_roles ur ON rp.role_id = ur.role_id \
             WHERE ur.user_id = $1 AND p.resource = $2 AND p.action = $3",
        )
        .bind(user_id)
        .bind(resource)
        .bind(action)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }
}

// =============================================================================
// AssignmentStore
// =============================================================================

#[async_trait]
impl AssignmentStore for PgStore {
    async fn assign_role(&self, user_id: i64, role_id: i64) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, role_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(role_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove_role(&self, user_id: i64, role_id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM user_roles WHERE user_id = $1 AND role_id = $2")
            .bind(user_id)
            .bind(role_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(format!(
                "role assignment for user {user_id} and role {role_id}"
            )));
        }
        Ok(())
    }

    async fn grant_permission(&self, role_id: i64, permission_id: i64) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO role_permissions (role_id, permission_id) VALUES ($1, $2) \
             ON CONFLICT (role_id, permission_id) DO NOTHING",
        )
        .bind(role_id)
        .bind(permission_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn revoke_permission(&self, role_id: i64, permission_id: i64) -> StoreResult<()> {
        let result =
            sqlx::query("DELETE FROM role_permissions WHERE role_id = $1 AND permission_id = $2")
                .bind(role_id)
                .bind(permission_id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(format!(
                "permission grant for role {role_id} and permission {permission_id}"
            )));
        }
        Ok(())
    }
}

// =============================================================================
// UserStore
// =============================================================================

#[async_trait]
impl UserStore for PgStore {
    async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn by_id(&self, id: i64) -> StoreResult<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found(format!("user {id}")))
    }

    async fn by_email(&self, email: &str) -> StoreResult<User> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found(format!("user with email {email}")))
    }

    async fn all(&self) -> StoreResult<Vec<User>> {
        let users =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;

        Ok(users)
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(format!("user {id}")));
        }
        Ok(())
    }
}

// =============================================================================
// RoleStore
// =============================================================================

#[async_trait]
impl RoleStore for PgStore {
    async fn by_id(&self, id: i64) -> StoreResult<Role> {
        sqlx::query_as::<_, Role>(&format!("SELECT {ROLE_COLUMNS} FROM roles WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found(format!("role {id}")))
    }

    async fn all(&self) -> StoreResult<Vec<Role>> {
        let roles =
            sqlx::query_as::<_, Role>(&format!("SELECT {ROLE_COLUMNS} FROM roles ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;

        Ok(roles)
    }

    async fn create(&self, name: &str, description: &str) -> StoreResult<Role> {
        let role = sqlx::query_as::<_, Role>(&format!(
            "INSERT INTO roles (name, description) VALUES ($1, $2) RETURNING {ROLE_COLUMNS}"
        ))
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(role)
    }

    async fn update(&self, id: i64, name: &str, description: &str) -> StoreResult<Role> {
        sqlx::query_as::<_, Role>(&format!(
            "UPDATE roles SET name = $1, description = $2, updated_at = now() \
             WHERE id = $3 RETURNING {ROLE_COLUMNS}"
        ))
        .bind(name)
        .bind(description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found(format!("role {id}")))
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(format!("role {id}")));
        }
        Ok(())
    }
}

// =============================================================================
// PermissionStore
// =============================================================================

#[async_trait]
impl PermissionStore for PgStore {
    async fn by_id(&self, id: i64) -> StoreResult<Permission> {
        sqlx::query_as::<_, Permission>(&format!(
            "SELECT {PERMISSION_COLUMNS} FROM permissions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found(format!("permission {id}")))
    }

    async fn all(&self) -> StoreResult<Vec<Permission>> {
        let permissions = sqlx::query_as::<_, Permission>(&format!(
            "SELECT {PERMISSION_COLUMNS} FROM permissions ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(permissions)
    }

    async fn of_role(&self, role_id: i64) -> StoreResult<Vec<Permission>> {
        let permissions = sqlx::query_as::<_, Permission>(
            "SELECT p.id, p.name, p.description, p.resource, p.action, \
                    p.created_at, p.updated_at \
             FROM permissions p \
             JOIN role_permissions rp ON p.id = rp.permission_id \
             WHERE rp.role_id = $1",
        )
        .bind(role_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(permissions)
    }

    async fn create(
        &self,
        name: &str,
        description: &str,
        resource: &str,
        action: &str,
    ) -> StoreResult<Permission> {
        let permission = sqlx::query_as::<_, Permission>(&format!(
            "INSERT INTO permissions (name, description, resource, action) \
             VALUES ($1, $2, $3, $4) RETURNING {PERMISSION_COLUMNS}"
        ))
        .bind(name)
        .bind(description)
        .bind(resource)
        .bind(action)
        .fetch_one(&self.pool)
        .await?;

        Ok(permission)
    }

    async fn update(
        &self,
        id: i64,
        name: &str,
        description: &str,
        resource: &str,
        action: &str,
    ) -> StoreResult<Permission> {
        sqlx::query_as::<_, Permission>(&format!(
            "UPDATE permissions SET name = $1, description = $2, resource = $3, \
             action = $4, updated_at = now() WHERE id = $5 RETURNING {PERMISSION_COLUMNS}"
        ))
        .bind(name)
        .bind(description)
        .bind(resource)
        .bind(action)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found(format!("permission {id}")))
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM permissions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(format!("permission {id}")));
        }
        Ok(())
    }
}
