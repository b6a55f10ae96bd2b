// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Permission management handlers. All admin-gated by the router.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use ward_core::Permission;

use crate::error::{ApiError, ApiResult};
use crate::response::{ApiResponse, Created};
use crate::state::AppState;

/// Create/update request body for permissions.
#[derive(Debug, Deserialize)]
pub struct PermissionRequest {
    /// Unique permission name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: String,
    /// The protected resource, e.g. `"roles"`.
    pub resource: String,
    /// The action on the resource, e.g. `"delete"`.
    pub action: String,
}

impl PermissionRequest {
    fn validate(&self) -> ApiResult<()> {
        if self.name.trim().is_empty() {
            return Err(ApiError::validation("permission name is required"));
        }
        if self.resource.trim().is_empty() || self.action.trim().is_empty() {
            return Err(ApiError::validation("resource and action are required"));
        }
        Ok(())
    }
}

/// GET /permissions
pub async fn list_permissions(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<Permission>>> {
    let permissions = state.permissions.all().await?;
    Ok(ApiResponse::success(
        "Permissions fetched successfully",
        permissions,
    ))
}

/// GET /permissions/{id}
pub async fn get_permission(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<Permission>> {
    let permission = state.permissions.by_id(id).await?;
    Ok(ApiResponse::success(
        "Permission fetched successfully",
        permission,
    ))
}

/// POST /permissions
pub async fn create_permission(
    State(state): State<AppState>,
    Json(request): Json<PermissionRequest>,
) -> ApiResult<Created<Permission>> {
    request.validate()?;

    let permission = state
        .permissions
        .create(
            &request.name,
            &request.description,
            &request.resource,
            &request.action,
        )
        .await?;

    tracing::info!(permission_id = permission.id, name = %permission.name,
        "Permission created");

    Ok(Created(ApiResponse::success(
        "Permission created successfully",
        permission,
    )))
}

/// PUT /permissions/{id}
pub async fn update_permission(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<PermissionRequest>,
) -> ApiResult<ApiResponse<Permission>> {
    request.validate()?;

    let permission = state
        .permissions
        .update(
            id,
            &request.name,
            &request.description,
            &request.resource,
            &request.action,
        )
        .await?;

    Ok(ApiResponse::success(
        "Permission updated successfully",
        permission,
    ))
}

/// DELETE /permissions/{id}
pub async fn delete_permission(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<ApiResponse<()>> {
    state.permissions.delete(id).await?;

    tracing::info!(permission_id = id, "Permission deleted");

    Ok(ApiResponse::message("Permission deleted successfully"))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_request_validation() {
        let valid = PermissionRequest {
            name: "roles:delete".to_string(),
            description: String::new(),
            resource: "roles".to_string(),
            action: "delete".to_string(),
        };
        assert!(valid.validate().is_ok());

        let missing_action = PermissionRequest {
            name: "roles:delete".to_string(),
            description: String::new(),
            resource: "roles".to_string(),
            action: " ".to_string(),
        };
        assert!(missing_action.validate().is_err());

        let blank_name = PermissionRequest {
            name: String::new(),
            description: String::new(),
            resource: "roles".to_string(),
            action: "delete".to_string(),
        };
        assert!(blank_name.validate().is_err());
    }
}
