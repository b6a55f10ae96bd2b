// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Liveness handler.

use crate::response::ApiResponse;

/// GET /ping
///
/// Liveness probe; public.
pub async fn ping() -> ApiResponse<&'static str> {
    ApiResponse::success("pong", crate::VERSION)
}
