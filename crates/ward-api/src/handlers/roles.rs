// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Role management handlers. All admin-gated by the router.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use ward_core::{Permission, Role};

use crate::error::{ApiError, ApiResult};
use crate::response::{ApiResponse, Created};
use crate::state::AppState;

// =============================================================================
// Role CRUD
// =============================================================================

/// Create/update request body for roles.
#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    /// Unique role name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: String,
}

impl RoleRequest {
    fn validate(&self) -> ApiResult<()> {
        if self.name.trim().is_empty() {
            return Err(ApiError::validation("role name is required"));
        }
        Ok(())
    }
}

/// GET /roles
pub async fn list_roles(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<Role>>> {
    let roles = state.roles.all().await?;
    Ok(ApiResponse::success("Roles fetched successfully", roles))
}

/// GET /roles/{id}
pub async fn get_role(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Role>> {
    let role = state.roles.by_id(id).await?;
    Ok(ApiResponse::success("Role fetched successfully", role))
}

/// POST /roles
pub async fn create_role(
    State(state): State<AppState>,
    Json(request): Json<RoleRequest>,
) -> ApiResult<Created<Role>> {
    request.validate()?;

    let role = state
        .roles
        .create(&request.name, &request.description)
        .await?;

    tracing::info!(role_id = role.id, name = %role.name, "Role created");

    Ok(Created(ApiResponse::success(
        "Role created successfully",
        role,
    )))
}

/// PUT /roles/{id}
pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<RoleRequest>,
) -> ApiResult<ApiResponse<Role>> {
    request.validate()?;

    let role = state
        .roles
        .update(id, &request.name, &request.description)
        .await?;

    Ok(ApiResponse::success("Role updated successfully", role))
}

/// DELETE /roles/{id}
///
/// Hard delete; deleting an absent role reports not-found with zero rows
/// touched.
pub async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<()>> {
    state.roles.delete(id).await?;

    tracing::info!(role_id = id, "Role deleted");

    Ok(ApiResponse::message("Role deleted successfully"))
}

// =============================================================================
// Role Permissions
// =============================================================================

/// GET /roles/{id}/permissions
pub async fn role_permissions(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Vec<Permission>>> {
    // Surface a 404 for an absent role rather than an empty grant list.
    state.roles.by_id(id).await?;

    let permissions = state.permissions.of_role(id).await?;
    Ok(ApiResponse::success(
        "Role permissions fetched successfully",
        permissions,
    ))
}

/// POST /roles/{id}/permissions/{permission_id}
///
/// Grants a permission to a role; granting twice is a no-op.
pub async fn grant_permission(
    State(state): State<AppState>,
    Path((id, permission_id)): Path<(i64, i64)>,
) -> ApiResult<ApiResponse<()>> {
    state.assignments.grant_permission(id, permission_id).await?;

    tracing::info!(role_id = id, permission_id, "Permission granted to role");

    Ok(ApiResponse::message("Permission granted successfully"))
}

/// DELETE /roles/{id}/permissions/{permission_id}
pub async fn revoke_permission(
    State(state): State<AppState>,
    Path((id, permission_id)): Path<(i64, i64)>,
) -> ApiResult<ApiResponse<()>> {
    state
        .assignments
        .revoke_permission(id, permission_id)
        .await?;

    tracing::info!(role_id = id, permission_id, "Permission revoked from role");

    Ok(ApiResponse::message("Permission revoked successfully"))
}

// =============================================================================
// Tests
// =============================================================================
