// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Domain model for identities, roles, and permissions.
//!
//! Roles are a derived relation on users, never embedded: a user's effective
//! role set is exactly the roles directly assigned through [`UserRole`] rows,
//! and the effective permission set is the deduplicated union of each
//! assigned role's permissions. There is no role hierarchy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// =============================================================================
// User
// =============================================================================

/// An account in the identity service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Stable unique identifier.
    pub id: i64,
    /// Display name.
    pub username: String,
    /// Unique email address, used as the login identifier.
    pub email: String,
    /// One-way credential hash. Never serialized outward.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Role
// =============================================================================

/// A named role that users can be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    /// Stable unique identifier.
    pub id: i64,
    /// Unique role name, e.g. `"admin"`.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Permission
// =============================================================================

/// A fine-grained capability on a protected resource.
///
/// `resource` names the protected noun and `action` the verb on it, e.g.
/// `("roles", "delete")`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Permission {
    /// Stable unique identifier.
    pub id: i64,
    /// Unique permission name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// The protected resource.
    pub resource: String,
    /// The action on the resource.
    pub action: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Join Relations
// =============================================================================

/// A user-to-role assignment. Unique per (user, role) pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRole {
    /// The assigned user.
    pub user_id: i64,
    /// The assigned role.
    pub role_id: i64,
}

/// A role-to-permission grant. Unique per (role, permission) pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RolePermission {
    /// The granting role.
    pub role_id: i64,
    /// The granted permission.
    pub permission_id: i64,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let user = sample_user();
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "alice@example.com");
        assert_eq!(json["username"], "alice");
    }

    #[test]
    fn test_role_round_trip() {
        let role = Role {
            id: 3,
            name: "moderator".to_string(),
            description: "Can moderate reviews".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&role).unwrap();
        let parsed: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, 3);
        assert_eq!(parsed.name, "moderator");
    }
}
