// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Review domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A review left by a user for a hotel booking.
///
/// Reviews are soft-deleted: `deleted_at` is set instead of removing the
/// row, and every query filters deleted rows out.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    /// Stable unique identifier.
    pub id: i64,
    /// The authoring user, as asserted by the gateway.
    pub user_id: i64,
    /// The booking being reviewed.
    pub booking_id: i64,
    /// The hotel being reviewed.
    pub hotel_id: i64,
    /// Free-text comment.
    pub comment: String,
    /// Star rating, 1 through 5.
    pub rating: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Whether the review has been synced to downstream consumers.
    pub is_synced: bool,
}
