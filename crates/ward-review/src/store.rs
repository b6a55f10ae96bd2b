// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Review storage.

use async_trait::async_trait;
use sqlx::PgPool;
use ward_core::{StoreError, StoreResult};

use crate::model::Review;

const REVIEW_COLUMNS: &str = "id, user_id, booking_id, hotel_id, comment, rating, \
                              created_at, updated_at, deleted_at, is_synced";

/// Embedded migrations for the review schema.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

// =============================================================================
// ReviewStore
// =============================================================================

/// CRUD surface over review records.
///
/// Deletion is soft: rows keep existing with `deleted_at` set and are
/// excluded from every query.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Lists all live reviews.
    async fn all(&self) -> StoreResult<Vec<Review>>;

    /// Fetches a live review by id.
    async fn by_id(&self, id: i64) -> StoreResult<Review>;

    /// Creates a review for the given user.
    async fn create(
        &self,
        user_id: i64,
        booking_id: i64,
        hotel_id: i64,
        comment: &str,
        rating: i32,
    ) -> StoreResult<Review>;

    /// Updates a review's comment and rating.
    async fn update(&self, id: i64, comment: &str, rating: i32) -> StoreResult<Review>;

    /// Soft-deletes a review.
    async fn delete(&self, id: i64) -> StoreResult<()>;

    /// Lists live reviews by author.
    async fn by_user(&self, user_id: i64) -> StoreResult<Vec<Review>>;

    /// Lists live reviews for a hotel.
    async fn by_hotel(&self, hotel_id: i64) -> StoreResult<Vec<Review>>;

    /// Lists live reviews for a booking.
    async fn by_booking(&self, booking_id: i64) -> StoreResult<Vec<Review>>;
}

// =============================================================================
// PgReviewStore
// =============================================================================

/// Postgres-backed review store.
#[derive(Debug, Clone)]
pub struct PgReviewStore {
    pool: PgPool,
}

impl PgReviewStore {
    /// Creates a store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn filtered(&self, column: &str, value: i64) -> StoreResult<Vec<Review>> {
        // `column` comes from a fixed set of call sites, never from input.
        let reviews = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews \
             WHERE {column} = $1 AND deleted_at IS NULL ORDER BY id"
        ))
        .bind(value)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }
}

#[async_trait]
impl ReviewStore for PgReviewStore {
    async fn all(&self) -> StoreResult<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE deleted_at IS NULL ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    async fn by_id(&self, id: i64) -> StoreResult<Review> {
        sqlx::query_as::<_, Review>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
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
        let review = sqlx::query_as::<_, Review>(&format!(
            "INSERT INTO reviews (user_id, booking_id, hotel_id, comment, rating) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(user_id)
        .bind(booking_id)
        .bind(hotel_id)
        .bind(comment)
        .bind(rating)
        .fetch_one(&self.pool)
        .await?;

        Ok(review)
    }

    async fn update(&self, id: i64, comment: &str, rating: i32) -> StoreResult<Review> {
        sqlx::query_as::<_, Review>(&format!(
            "UPDATE reviews SET comment = $1, rating = $2, updated_at = now() \
             WHERE id = $3 AND deleted_at IS NULL RETURNING {REVIEW_COLUMNS}"
        ))
        .bind(comment)
        .bind(rating)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found(format!("review {id}")))
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE reviews SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(format!("review {id}")));
        }
        Ok(())
    }

    async fn by_user(&self, user_id: i64) -> StoreResult<Vec<Review>> {
        self.filtered("user_id", user_id).await
    }

    async fn by_hotel(&self, hotel_id: i64) -> StoreResult<Vec<Review>> {
        self.filtered("hotel_id", hotel_id).await
    }

    async fn by_booking(&self, booking_id: i64) -> StoreResult<Vec<Review>> {
        self.filtered("booking_id", booking_id).await
    }
}
