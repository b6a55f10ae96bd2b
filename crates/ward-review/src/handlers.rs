// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Review handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::{ReviewError, ReviewResult};
use crate::extract::TrustedUser;
use crate::model::Review;
use crate::response::{ApiResponse, Created};
use crate::server::ReviewState;

fn validate_comment(comment: &str) -> ReviewResult<()> {
    if comment.is_empty() || comment.len() > 1000 {
        return Err(ReviewError::validation(
            "comment must be between 1 and 1000 characters",
        ));
    }
    Ok(())
}

fn validate_rating(rating: i32) -> ReviewResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(ReviewError::validation("rating must be between 1 and 5"));
    }
    Ok(())
}

// =============================================================================
// CRUD
// =============================================================================

/// Create request body. The author comes from the trusted header, never
/// from the body.
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    /// The booking being reviewed.
    pub booking_id: i64,
    /// The hotel being reviewed.
    pub hotel_id: i64,
    /// Free-text comment.
    pub comment: String,
    /// Star rating, 1 through 5.
    pub rating: i32,
}

impl CreateReviewRequest {
    fn validate(&self) -> ReviewResult<()> {
        validate_comment(&self.comment)?;
        validate_rating(self.rating)
    }
}

/// POST /reviews
pub async fn create_review(
    State(state): State<ReviewState>,
    TrustedUser(user_id): TrustedUser,
    Json(request): Json<CreateReviewRequest>,
) -> ReviewResult<Created<Review>> {
    request.validate()?;

    let review = state
        .store
        .create(
            user_id,
            request.booking_id,
            request.hotel_id,
            &request.comment,
            request.rating,
        )
        .await?;

    tracing::info!(review_id = review.id, user_id, "Review created");

    Ok(Created(ApiResponse::success(
        "Review created successfully",
        review,
    )))
}

/// GET /reviews
pub async fn list_reviews(
    State(state): State<ReviewState>,
) -> ReviewResult<ApiResponse<Vec<Review>>> {
    let reviews = state.store.all().await?;
    Ok(ApiResponse::success("Reviews fetched successfully", reviews))
}

/// GET /reviews/{id}
pub async fn get_review(
    State(state): State<ReviewState>,
    Path(id): Path<i64>,
) -> ReviewResult<ApiResponse<Review>> {
    let review = state.store.by_id(id).await?;
    Ok(ApiResponse::success("Review fetched successfully", review))
}

/// Update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    /// Free-text comment.
    pub comment: String,
    /// Star rating, 1 through 5.
    pub rating: i32,
}

impl UpdateReviewRequest {
    fn validate(&self) -> ReviewResult<()> {
        validate_comment(&self.comment)?;
        validate_rating(self.rating)
    }
}

/// PUT /reviews/{id}
pub async fn update_review(
    State(state): State<ReviewState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateReviewRequest>,
) -> ReviewResult<ApiResponse<Review>> {
    request.validate()?;

    let review = state
        .store
        .update(id, &request.comment, request.rating)
        .await?;

    Ok(ApiResponse::success("Review updated successfully", review))
}

/// DELETE /reviews/{id}
pub async fn delete_review(
    State(state): State<ReviewState>,
    Path(id): Path<i64>,
) -> ReviewResult<ApiResponse<()>> {
    state.store.delete(id).await?;

    tracing::info!(review_id = id, "Review deleted");

    Ok(ApiResponse::message("Review deleted successfully"))
}

// =============================================================================
// Filters
// =============================================================================

/// Query parameters for the by-user filter.
#[derive(Debug, Deserialize)]
pub struct UserFilter {
    /// The authoring user id.
    pub user_id: i64,
}

/// GET /reviews/user?user_id=N
pub async fn reviews_by_user(
    State(state): State<ReviewState>,
    Query(filter): Query<UserFilter>,
) -> ReviewResult<ApiResponse<Vec<Review>>> {
    let reviews = state.store.by_user(filter.user_id).await?;
    Ok(ApiResponse::success("Reviews fetched successfully", reviews))
}

/// Query parameters for the by-hotel filter.
#[derive(Debug, Deserialize)]
pub struct HotelFilter {
    /// The hotel id.
    pub hotel_id: i64,
}

/// GET /reviews/hotel?hotel_id=N
pub async fn reviews_by_hotel(
    State(state): State<ReviewState>,
    Query(filter): Query<HotelFilter>,
) -> ReviewResult<ApiResponse<Vec<Review>>> {
    let reviews = state.store.by_hotel(filter.hotel_id).await?;
    Ok(ApiResponse::success("Reviews fetched successfully", reviews))
}

/// Query parameters for the by-booking filter.
#[derive(Debug, Deserialize)]
pub struct BookingFilter {
    /// The booking id.
    pub booking_id: i64,
}

/// GET /reviews/booking?booking_id=N
pub async fn reviews_by_booking(
    State(state): State<ReviewState>,
    Query(filter): Query<BookingFilter>,
) -> ReviewResult<ApiResponse<Vec<Review>>> {
    let reviews = state.store.by_booking(filter.booking_id).await?;
    Ok(ApiResponse::success("Reviews fetched successfully", reviews))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let valid = CreateReviewRequest {
            booking_id: 1,
            hotel_id: 2,
            comment: "Great stay".to_string(),
            rating: 5,
        };
        assert!(valid.validate().is_ok());

        let empty_comment = CreateReviewRequest {
            comment: String::new(),
            ..valid
        };
        assert!(empty_comment.validate().is_err());
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_comment_length_bound() {
        assert!(validate_comment("x").is_ok());
        assert!(validate_comment(&"x".repeat(1000)).is_ok());
        assert!(validate_comment(&"x".repeat(1001)).is_err());
        assert!(validate_comment("").is_err());
    }
}
