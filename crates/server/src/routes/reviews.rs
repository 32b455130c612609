//! Review handlers.

use axum::{Json, extract::State};

use super::ApiJson;
use crate::db::{InsertOutcome, ReviewRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireToken;
use crate::models::{NewReview, Review};
use crate::state::AppState;

/// List every review.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Review>>> {
    let reviews = ReviewRepository::new(state.store()).list().await?;
    Ok(Json(reviews))
}

/// Post a review.
///
/// The body is stored as given; the reviewer's `email` is not checked
/// against the token.
pub async fn create(
    State(state): State<AppState>,
    RequireToken(_claims): RequireToken,
    ApiJson(review): ApiJson<NewReview>,
) -> Result<Json<InsertOutcome>> {
    if !review.has_valid_rating() {
        return Err(AppError::BadRequest(format!(
            "rating must be between {} and {}",
            NewReview::MIN_RATING,
            NewReview::MAX_RATING
        )));
    }

    let outcome = ReviewRepository::new(state.store()).create(&review).await?;
    Ok(Json(outcome))
}
