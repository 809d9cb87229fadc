//! SurrealDB implementation of [`ReviewRepository`].

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tourhub_core::error::TourResult;
use tourhub_core::models::review::{CreateReview, Review};
use tourhub_core::repository::ReviewRepository;
use uuid::Uuid;

use super::parse_uuid;
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct ReviewRow {
    guide_id: String,
    author_email: String,
    author_name: String,
    rating: u32,
    comment: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct ReviewRowWithId {
    record_id: String,
    guide_id: String,
    author_email: String,
    author_name: String,
    rating: u32,
    comment: String,
    created_at: DateTime<Utc>,
}

fn parse_rating(rating: u32) -> Result<u8, DbError> {
    u8::try_from(rating).map_err(|_| DbError::Decode(format!("rating out of range: {rating}")))
}

impl ReviewRow {
    fn into_review(self, id: Uuid) -> Result<Review, DbError> {
        Ok(Review {
            id,
            guide_id: parse_uuid(&self.guide_id, "guide")?,
            author_email: self.author_email,
            author_name: self.author_name,
            rating: parse_rating(self.rating)?,
            comment: self.comment,
            created_at: self.created_at,
        })
    }
}

impl ReviewRowWithId {
    fn try_into_review(self) -> Result<Review, DbError> {
        Ok(Review {
            id: parse_uuid(&self.record_id, "review")?,
            guide_id: parse_uuid(&self.guide_id, "guide")?,
            author_email: self.author_email,
            author_name: self.author_name,
            rating: parse_rating(self.rating)?,
            comment: self.comment,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the Review repository.
#[derive(Clone)]
pub struct SurrealReviewRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealReviewRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ReviewRepository for SurrealReviewRepository<C> {
    async fn create(&self, input: CreateReview) -> TourResult<Review> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('review', $id) SET \
                 guide_id = $guide_id, \
                 author_email = $author_email, \
                 author_name = $author_name, \
                 rating = $rating, \
                 comment = $comment",
            )
            .bind(("id", id_str.clone()))
            .bind(("guide_id", input.guide_id.to_string()))
            .bind(("author_email", input.author_email))
            .bind(("author_name", input.author_name))
            .bind(("rating", u32::from(input.rating)))
            .bind(("comment", input.comment))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement("review", e))?;

        let rows: Vec<ReviewRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "review".into(),
            id: id_str,
        })?;

        Ok(row.into_review(id)?)
    }

    async fn list_by_guide(&self, guide_id: Uuid) -> TourResult<Vec<Review>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM review \
                 WHERE guide_id = $guide_id ORDER BY created_at DESC",
            )
            .bind(("guide_id", guide_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ReviewRowWithId> = result.take(0).map_err(DbError::from)?;

        let reviews = rows
            .into_iter()
            .map(ReviewRowWithId::try_into_review)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(reviews)
    }
}
