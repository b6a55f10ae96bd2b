// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! User administration handlers. All admin-gated by the router.

use axum::extract::{Path, State};
use ward_core::{Permission, Role, User};

use crate::error::ApiResult;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<User>>> {
    let users = state.users.all().await?;
    Ok(ApiResponse::success("Users fetched successfully", users))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<()>> {
    state.users.delete(id).await?;

    tracing::info!(user_id = id, "User deleted");

    Ok(ApiResponse::message("User deleted successfully"))
}

/// GET /users/{id}/roles
pub async fn user_roles(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Vec<Role>>> {
    state.users.by_id(id).await?;

    let roles = state.authz.roles_of_user(id).await?;
    Ok(ApiResponse::success("User roles fetched successfully", roles))
}

/// GET /users/{id}/permissions
///
/// The user's effective permissions: the deduplicated union across every
/// assigned role.
pub async fn user_permissions(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Vec<Permission>>> {
    state.users.by_id(id).await?;

    let permissions = state.authz.permissions_of_user(id).await?;
    Ok(ApiResponse::success(
        "User permissions fetched successfully",
        permissions,
    ))
}

/// POST /users/{id}/roles/{role_id}
///
/// Assigns a role to a user; assigning twice is a no-op.
pub async fn assign_role(
    State(state): State<AppState>,
    Path((id, role_id)): Path<(i64, i64)>,
) -> ApiResult<ApiResponse<()>> {
    state.assignments.assign_role(id, role_id).await?;

    tracing::info!(user_id = id, role_id, "Role assigned to user");

    Ok(ApiResponse::message("Role assigned successfully"))
}

/// DELETE /users/{id}/roles/{role_id}
pub async fn remove_role(
    State(state): State<AppState>,
    Path((id, role_id)): Path<(i64, i64)>,
) -> ApiResult<ApiResponse<()>> {
    state.assignments.remove_role(id, role_id).await?;

    tracing::info!(user_id = id, role_id, "Role removed from user");

    Ok(ApiResponse::message("Role removed successfully"))
}
