use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tourhub_core::models::review::{Review, ReviewRequest};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, Session};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", post(create_review))
        .route("/reviews/{id}", get(list_reviews))
}

async fn create_review(
    State(state): State<AppState>,
    Session(identity): Session,
    ApiJson(request): ApiJson<ReviewRequest>,
) -> ApiResult<(StatusCode, Json<Review>)> {
    let review = state
        .reviews
        .create(request, identity.email(), identity.name())
        .await?;
    Ok((StatusCode::CREATED, Json(review)))
}

async fn list_reviews(
    State(state): State<AppState>,
    _session: Session,
    ApiPath(guide_id): ApiPath<Uuid>,
) -> ApiResult<Json<Vec<Review>>> {
    Ok(Json(state.reviews.list_for_guide(guide_id).await?))
}
