// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Seeded RBAC fixtures.

use std::sync::Arc;

use ward_core::{
    AssignmentStore, PasswordHasher, Permission, PermissionStore, Role, RoleStore, User,
};

use crate::common::mocks::MemoryDirectory;

/// Bcrypt cost used throughout the tests; minimum keeps them fast.
pub const TEST_BCRYPT_COST: u32 = 4;

/// Password shared by all seeded users.
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// A seeded directory:
///
/// - user 7 (`admin@example.com`) holds the `admin` role
/// - user 8 (`nobody@example.com`) holds no roles at all
/// - the `admin` role is granted the `roles:delete` permission
/// - a `moderator` role exists unassigned
pub struct Scenario {
    /// The backing store.
    pub directory: Arc<MemoryDirectory>,
    /// User 7, the admin.
    pub admin: User,
    /// User 8, holding no roles.
    pub nobody: User,
    /// The `admin` role.
    pub admin_role: Role,
    /// The `moderator` role, unassigned.
    pub moderator_role: Role,
    /// The `roles:delete` permission, granted to `admin`.
    pub delete_roles: Permission,
}

impl Scenario {
    /// Builds the seeded directory.
    pub async fn seeded() -> Self {
        let directory = Arc::new(MemoryDirectory::new());
        let hasher = PasswordHasher::new(TEST_BCRYPT_COST);
        let hash = hasher.hash(TEST_PASSWORD).unwrap();

        let admin = directory.seed_user(7, "admin", "admin@example.com", &hash);
        let nobody = directory.seed_user(8, "nobody", "nobody@example.com", &hash);

        let admin_role = RoleStore::create(&*directory, "admin", "Full administrative access")
            .await
            .unwrap();
        let moderator_role = RoleStore::create(&*directory, "moderator", "Can moderate reviews")
            .await
            .unwrap();

        let delete_roles = PermissionStore::create(
            &*directory,
            "roles:delete",
            "Delete roles",
            "roles",
            "delete",
        )
        .await
        .unwrap();

        directory
            .grant_permission(admin_role.id, delete_roles.id)
            .await
            .unwrap();
        directory.assign_role(admin.id, admin_role.id).await.unwrap();

        Self {
            directory,
            admin,
            nobody,
            admin_role,
            moderator_role,
            delete_roles,
        }
    }
}
