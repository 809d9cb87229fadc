//! Bookings from the tourist side and trips from the guide side.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, patch};
use axum::{Json, Router};
use serde::Deserialize;
use tourhub_core::models::booking::{Booking, BookingRequest, BookingStatus, UpdateTrip};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery, GuideSession, Session};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route("/bookings/status", get(booking_status))
        .route("/bookings/{id}", delete(cancel_booking))
        .route("/guides/{id}/trips", get(list_trips))
        .route("/trips/{id}", patch(update_trip))
}

#[derive(Debug, Deserialize)]
struct StatusQuery {
    package: Uuid,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TouristQuery {
    email: Option<String>,
}

async fn create_booking(
    State(state): State<AppState>,
    _session: Session,
    ApiJson(request): ApiJson<BookingRequest>,
) -> ApiResult<(StatusCode, Json<Booking>)> {
    let booking = state.bookings.create(request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

async fn cancel_booking(
    State(state): State<AppState>,
    Session(identity): Session,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<StatusCode> {
    state.bookings.cancel(id, identity.email()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The email defaults to the caller's own.
async fn booking_status(
    State(state): State<AppState>,
    Session(identity): Session,
    ApiQuery(query): ApiQuery<StatusQuery>,
) -> ApiResult<Json<BookingStatus>> {
    let email = query.email.as_deref().unwrap_or(identity.email());
    Ok(Json(state.bookings.booking_status(query.package, email).await?))
}

async fn list_bookings(
    State(state): State<AppState>,
    Session(identity): Session,
    ApiQuery(query): ApiQuery<TouristQuery>,
) -> ApiResult<Json<Vec<Booking>>> {
    let email = query.email.as_deref().unwrap_or(identity.email());
    Ok(Json(state.bookings.list_for_tourist(email).await?))
}

async fn list_trips(
    State(state): State<AppState>,
    _guide: GuideSession,
    ApiPath(guide_id): ApiPath<Uuid>,
) -> ApiResult<Json<Vec<Booking>>> {
    Ok(Json(state.bookings.list_trips_for_guide(guide_id).await?))
}

async fn update_trip(
    State(state): State<AppState>,
    GuideSession(guide): GuideSession,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<UpdateTrip>,
) -> ApiResult<Json<Booking>> {
    let booking = state
        .bookings
        .update_trip(id, patch, guide.user_id())
        .await?;
    Ok(Json(booking))
}
