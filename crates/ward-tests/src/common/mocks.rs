// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! In-memory store implementation for testing.
//!
//! [`MemoryDirectory`] implements every store trait over plain collections,
//! mirroring the storage-level contracts: unique emails and names report
//! conflicts, assignment inserts are idempotent, removals of absent rows
//! report not-found, and deleting a user or role cascades its join rows.
//! `fail_everything` injects [`StoreError::Unavailable`] into every query
//! for fail-closed testing.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use ward_core::{
    AssignmentStore, AuthorizationStore, Permission, PermissionStore, Role, RoleStore,
    StoreError, StoreResult, User, UserRole, UserStore,
};
use ward_review::{Review, ReviewStore};

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    roles: Vec<Role>,
    permissions: Vec<Permission>,
    user_roles: HashSet<(i64, i64)>,
    role_permissions: HashSet<(i64, i64)>,
    next_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory implementation of every store trait.
#[derive(Default)]
pub struct MemoryDirectory {
    inner: Mutex<Inner>,
    fail: AtomicBool,
}

impl MemoryDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent query fail with `StoreError::Unavailable`.
    pub fn fail_everything(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    /// Restores normal operation.
    pub fn recover(&self) {
        self.fail.store(false, Ordering::SeqCst);
    }

    /// Inserts a user with an explicit id, for scenario seeding.
    pub fn seed_user(&self, id: i64, username: &str, email: &str, password_hash: &str) -> User {
        let user = User {
            id,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let mut inner = self.inner.lock().unwrap();
        inner.next_id = inner.next_id.max(id);
        inner.users.push(user.clone());
        user
    }

    /// Returns the number of user-role rows, for idempotency assertions.
    pub fn user_role_count(&self) -> usize {
        self.inner.lock().unwrap().user_roles.len()
    }

    /// Returns the raw user-role rows.
    pub fn user_role_rows(&self) -> Vec<UserRole> {
        self.inner
            .lock()
            .unwrap()
            .user_roles
            .iter()
            .map(|&(user_id, role_id)| UserRole { user_id, role_id })
            .collect()
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("injected failure".to_string()))
        } else {
            Ok(())
        }
    }
}

// =============================================================================
// AuthorizationStore
// =============================================================================

#[async_trait]
impl AuthorizationStore for MemoryDirectory {
    async fn roles_of_user(&self, user_id: i64) -> StoreResult<Vec<Role>> {
        self.check_available()?;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .roles
            .iter()
            .filter(|role| inner.user_roles.contains(&(user_id, role.id)))
            .cloned()
            .collect())
    }

    async fn permissions_of_user(&self, user_id: i64) -> StoreResult<Vec<Permission>> {
        self.check_available()?;
        let inner = self.inner.lock().unwrap();

        // Dedup union across the user's roles, as the SQL DISTINCT does.
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for &(uid, role_id) in &inner.user_roles {
            if uid != user_id {
                continue;
            }
            for &(rid, permission_id) in &inner.role_permissions {
                if rid == role_id && seen.insert(permission_id) {
                    if let Some(p) = inner.permissions.iter().find(|p| p.id == permission_id) {
                        result.push(p.clone());
                    }
                }
            }
        }
        Ok(result)
    }

    async fn has_role(&self, user_id: i64, role_name: &str) -> StoreResult<bool> {
        self.check_available()?;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .roles
            .iter()
            .any(|role| role.name == role_name && inner.user_roles.contains(&(user_id, role.id))))
    }

    async fn has_permission(
        &self,
        user_id: i64,
        resource: &str,
        action: &str,
    ) -> StoreResult<bool> {
        self.check_available()?;
        let inner = self.inner.lock().unwrap();
        Ok(inner.permissions.iter().any(|p| {
            p.resource == resource
                && p.action == action
                && inner.role_permissions.iter().any(|&(role_id, pid)| {
                    pid == p.id && inner.user_roles.contains(&(user_id, role_id))
                })
        }))
    }
}

// =============================================================================
// AssignmentStore
// =============================================================================

#[async_trait]
impl AssignmentStore for MemoryDirectory {
    async fn assign_role(&self, user_id: i64, role_id: i64) -> StoreResult<()> {
        self.check_available()?;
        self.inner
            .lock()
            .unwrap()
            .user_roles
            .insert((user_id, role_id));
        Ok(())
    }

    async fn remove_role(&self, user_id: i64, role_id: i64) -> StoreResult<()> {
        self.check_available()?;
        if self
            .inner
            .lock()
            .unwrap()
            .user_roles
            .remove(&(user_id, role_id))
        {
            Ok(())
        } else {
            Err(StoreError::not_found(format!(
                "role assignment for user {user_id} and role {role_id}"
            )))
        }
    }

    async fn grant_permission(&self, role_id: i64, permission_id: i64) -> StoreResult<()> {
        self.check_available()?;
        self.inner
            .lock()
            .unwrap()
            .role_permissions
            .insert((role_id, permission_id));
        Ok(())
    }

    async fn revoke_permission(&self, role_id: i64, permission_id: i64) -> StoreResult<()> {
        self.check_available()?;
        if self
            .inner
            .lock()
            .unwrap()
            .role_permissions
            .remove(&(role_id, permission_id))
        {
            Ok(())
        } else {
            Err(StoreError::not_found(format!(
                "permission grant for role {role_id} and permission {permission_id}"
            )))
        }
    }
}

// =============================================================================
// UserStore
// =============================================================================

#[async_trait]
impl UserStore for MemoryDirectory {
    async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> StoreResult<User> {
        self.check_available()?;
        let mut inner = self.inner.lock().unwrap();
        if inner.users.iter().any(|u| u.email == email) {
            return Err(StoreError::Conflict(format!(
                "duplicate key: users.email = {email}"
            )));
        }
        let user = User {
            id: inner.next_id(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn by_id(&self, id: i64) -> StoreResult<User> {
        self.check_available()?;
        self.inner
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("user {id}")))
    }

    async fn by_email(&self, email: &str) -> StoreResult<User> {
        self.check_available()?;
        self.inner
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("user with email {email}")))
    }

    async fn all(&self) -> StoreResult<Vec<User>> {
        self.check_available()?;
        Ok(self.inner.lock().unwrap().users.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.check_available()?;
        let mut inner = self.inner.lock().unwrap();
        let before = inner.users.len();
        inner.users.retain(|u| u.id != id);
        if inner.users.len() == before {
            return Err(StoreError::not_found(format!("user {id}")));
        }
        inner.user_roles.retain(|&(user_id, _)| user_id != id);
        Ok(())
    }
}

// =============================================================================
// RoleStore
// =============================================================================

#[async_trait]
impl RoleStore for MemoryDirectory {
    async fn by_id(&self, id: i64) -> StoreResult<Role> {
        self.check_available()?;
        self.inner
            .lock()
            .unwrap()
            .roles
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("role {id}")))
    }

    async fn all(&self) -> StoreResult<Vec<Role>> {
        self.check_available()?;
        Ok(self.inner.lock().unwrap().roles.clone())
    }

    async fn create(&self, name: &str, description: &str) -> StoreResult<Role> {
        self.check_available()?;
        let mut inner = self.inner.lock().unwrap();
        if inner.roles.iter().any(|r| r.name == name) {
            return Err(StoreError::Conflict(format!(
                "duplicate key: roles.name = {name}"
            )));
        }
        let role = Role {
            id: inner.next_id(),
            name: name.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        inner.roles.push(role.clone());
        Ok(role)
    }

    async fn update(&self, id: i64, name: &str, description: &str) -> StoreResult<Role> {
        self.check_available()?;
        let mut inner = self.inner.lock().unwrap();
        let role = inner
            .roles
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::not_found(format!("role {id}")))?;
        role.name = name.to_string();
        role.description = description.to_string();
        role.updated_at = Utc::now();
        Ok(role.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.check_available()?;
        let mut inner = self.inner.lock().unwrap();
        let before = inner.roles.len();
        inner.roles.retain(|r| r.id != id);
        if inner.roles.len() == before {
            return Err(StoreError::not_found(format!("role {id}")));
        }
        inner.user_roles.retain(|&(_, role_id)| role_id != id);
        inner.role_permissions.retain(|&(role_id, _)| role_id != id);
        Ok(())
    }
}

// =============================================================================
// PermissionStore
// =============================================================================

#[async_trait]
impl PermissionStore for MemoryDirectory {
    async fn by_id(&self, id: i64) -> StoreResult<Permission> {
        self.check_available()?;
        self.inner
            .lock()
            .unwrap()
            .permissions
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("permission {id}")))
    }

    async fn all(&self) -> StoreResult<Vec<Permission>> {
        self.check_available()?;
        Ok(self.inner.lock().unwrap().permissions.clone())
    }

    async fn of_role(&self, role_id: i64) -> StoreResult<Vec<Permission>> {
        self.check_available()?;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .permissions
            .iter()
            .filter(|p| inner.role_permissions.contains(&(role_id, p.id)))
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        name: &str,
        description: &str,
        resource: &str,
        action: &str,
    ) -> StoreResult<Permission> {
        self.check_available()?;
        let mut inner = self.inner.lock().unwrap();
        if inner.permissions.iter().any(|p| p.name == name) {
            return Err(StoreError::Conflict(format!(
                "duplicate key: permissions.name = {name}"
            )));
        }
        let permission = Permission {
            id: inner.next_id(),
            name: name.to_string(),
            description: description.to_string(),
            resource: resource.to_string(),
            action: action.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        inner.permissions.push(permission.clone());
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
        self.check_available()?;
        let mut inner = self.inner.lock().unwrap();
        let permission = inner
            .permissions
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found(format!("permission {id}")))?;
        permission.name = name.to_string();
        permission.description = description.to_string();
        permission.resource = resource.to_string();
        permission.action = action.to_string();
        permission.updated_at = Utc::now();
        Ok(permission.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        self.check_available()?;
        let mut inner = self.inner.lock().unwrap();
        let before = inner.permissions.len();
        inner.permissions.retain(|p| p.id != id);
        if inner.permissions.len() == before {
            return Err(StoreError::not_found(format!("permission {id}")));
        }
        inner
            .role_permissions
            .retain(|&(_, permission_id)| permission_id != id);
        Ok(())
    }
}

// =============================================================================
// MemoryReviewStore
// =============================================================================

/// In-memory review store mirroring the soft-delete contracts.
#[derive(Default)]
pub struct MemoryReviewStore {
    reviews: Mutex<Vec<Review>>,
    next_id: Mutex<i64>,
}

impl MemoryReviewStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn live<F: Fn(&Review) -> bool>(&self, keep: F) -> Vec<Review> {
        self.reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.deleted_at.is_none() && keep(r))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ReviewStore for MemoryReviewStore {
    async fn all(&self) -> StoreResult<Vec<Review>> {
        Ok(self.live(|_| true))
    }

    async fn by_id(&self, id: i64) -> StoreResult<Review> {
        self.live(|r| r.id == id)
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::not_found(format!("review {id}")))
    }

    async fn create(
        &self,
        user_id: i64,
        booking_id: i64,
        hotel_id: i64,
        comment: &str,
        rating: i32,
    ) -> StoreResult<Review> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let review = Review {
            id: *next_id,
            user_id,
            booking_id,
            hotel_id,
            comment: comment.to_string(),
            rating,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
            is_synced: false,
        };
        self.reviews.lock().unwrap().push(review.clone());
        Ok(review)
    }

    async fn update(&self, id: i64, comment: &str, rating: i32) -> StoreResult<Review> {
        let mut reviews = self.reviews.lock().unwrap();
        let review = reviews
            .iter_mut()
            .find(|r| r.id == id && r.deleted_at.is_none())
            .ok_or_else(|| StoreError::not_found(format!("review {id}")))?;
        review.comment = comment.to_string();
        review.rating = rating;
        review.updated_at = Utc::now();
        Ok(review.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let mut reviews = self.reviews.lock().unwrap();
        let review = reviews
            .iter_mut()
            .find(|r| r.id == id && r.deleted_at.is_none())
            .ok_or_else(|| StoreError::not_found(format!("review {id}")))?;
        review.deleted_at = Some(Utc::now());
        Ok(())
    }

    async fn by_user(&self, user_id: i64) -> StoreResult<Vec<Review>> {
        Ok(self.live(|r| r.user_id == user_id))
    }

    async fn by_hotel(&self, hotel_id: i64) -> StoreResult<Vec<Review>> {
        Ok(self.live(|r| r.hotel_id == hotel_id))
    }

    async fn by_booking(&self, booking_id: i64) -> StoreResult<Vec<Review>> {
        Ok(self.live(|r| r.booking_id == booking_id))
    }
}
