//! Review ledger.

use tourhub_core::error::{TourError, TourResult};
use tourhub_core::models::review::{CreateReview, MAX_RATING, MIN_RATING, Review, ReviewRequest};
use tourhub_core::repository::ReviewRepository;
use tracing::info;
use uuid::Uuid;

pub struct ReviewService<R: ReviewRepository> {
    reviews: R,
}

impl<R: ReviewRepository> ReviewService<R> {
    pub fn new(reviews: R) -> Self {
        Self { reviews }
    }

    /// Store a review written by the session holder.
    ///
    /// When the session carries no display name the email stands in.
    pub async fn create(
        &self,
        request: ReviewRequest,
        author_email: &str,
        author_name: Option<&str>,
    ) -> TourResult<Review> {
        if !(MIN_RATING..=MAX_RATING).contains(&request.rating) {
            return Err(TourError::validation(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}"
            )));
        }

        let review = self
            .reviews
            .create(CreateReview {
                guide_id: request.guide_id,
                author_email: author_email.to_string(),
                author_name: author_name.unwrap_or(author_email).to_string(),
                rating: request.rating,
                comment: request.comment,
            })
            .await?;

        info!(review_id = %review.id, guide_id = %review.guide_id, rating = review.rating, "Review created");
        Ok(review)
    }

    pub async fn list_for_guide(&self, guide_id: Uuid) -> TourResult<Vec<Review>> {
        self.reviews.list_by_guide(guide_id).await
    }
}
