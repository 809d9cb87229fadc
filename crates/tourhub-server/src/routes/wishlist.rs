use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tourhub_core::models::package::Package;
use tourhub_core::models::wishlist::WishlistEntry;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, Session};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wishlist", post(add_wish))
        .route("/wishlist/{email}", get(resolve_wishlist))
        .route("/wishlist/package/{id}", delete(remove_wish))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WishRequest {
    package_id: Uuid,
    /// Defaults to the caller's email.
    email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RemovedWishes {
    deleted_count: u64,
}

async fn add_wish(
    State(state): State<AppState>,
    Session(identity): Session,
    ApiJson(request): ApiJson<WishRequest>,
) -> ApiResult<(StatusCode, Json<WishlistEntry>)> {
    let email = request.email.as_deref().unwrap_or(identity.email());
    let entry = state.wishlist.add(request.package_id, email).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn resolve_wishlist(
    State(state): State<AppState>,
    _session: Session,
    ApiPath(email): ApiPath<String>,
) -> ApiResult<Json<Vec<Package>>> {
    Ok(Json(state.wishlist.resolve(&email).await?))
}

async fn remove_wish(
    State(state): State<AppState>,
    _session: Session,
    ApiPath(package_id): ApiPath<Uuid>,
) -> ApiResult<Json<RemovedWishes>> {
    let deleted_count = state.wishlist.remove_by_package(package_id).await?;
    Ok(Json(RemovedWishes { deleted_count }))
}
