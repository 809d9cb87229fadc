use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tourhub_core::models::package::{CreatePackage, Package, PackageTypeSummary, UpdatePackage};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extract::{AdminSession, ApiJson, ApiPath};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/packages", post(create_package))
        .route("/packages/types", get(package_types))
        .route(
            "/packages/{id}",
            get(get_package).put(update_package).delete(delete_package),
        )
}

async fn create_package(
    State(state): State<AppState>,
    _admin: AdminSession,
    ApiJson(input): ApiJson<CreatePackage>,
) -> ApiResult<(StatusCode, Json<Package>)> {
    let package = state.packages.create(input).await?;
    Ok((StatusCode::CREATED, Json(package)))
}

async fn package_types(State(state): State<AppState>) -> ApiResult<Json<Vec<PackageTypeSummary>>> {
    Ok(Json(state.packages.package_types().await?))
}

async fn get_package(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<Package>> {
    Ok(Json(state.packages.get(id).await?))
}

async fn update_package(
    State(state): State<AppState>,
    _admin: AdminSession,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<UpdatePackage>,
) -> ApiResult<Json<Package>> {
    Ok(Json(state.packages.update(id, input).await?))
}

async fn delete_package(
    State(state): State<AppState>,
    _admin: AdminSession,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<StatusCode> {
    state.packages.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
