use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tourhub_core::models::role::Role;
use tourhub_core::models::user::{CreateUser, Registration, RoleView, UpdateUser, User};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extract::{AdminSession, ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(register))
        .route(
            "/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        // `{id}` is the user's email here; the segment name has to match
        // the sibling route.
        .route("/users/{id}/role", get(role_of))
}

#[derive(Debug, Deserialize)]
struct UserFilter {
    role: Option<Role>,
}

async fn register(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateUser>,
) -> ApiResult<Json<Registration>> {
    Ok(Json(state.users.register(input).await?))
}

async fn list_users(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<UserFilter>,
) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.users.list(filter.role).await?))
}

async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.users.get(id).await?))
}

async fn update_user(
    State(state): State<AppState>,
    _admin: AdminSession,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<UpdateUser>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.users.update(id, input).await?))
}

async fn delete_user(
    State(state): State<AppState>,
    _admin: AdminSession,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<StatusCode> {
    state.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn role_of(
    State(state): State<AppState>,
    ApiPath(email): ApiPath<String>,
) -> ApiResult<Json<RoleView>> {
    Ok(Json(state.users.role_of(&email).await?))
}
