//! Request extractors: session guards and JSON/path/query wrappers that
//! reject with [`ApiError`] instead of axum's plain-text rejections.

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use tourhub_auth::{AuthenticatedIdentity, AuthorizedIdentity};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Any caller holding a valid session cookie.
#[derive(Debug, Clone)]
pub struct Session(pub AuthenticatedIdentity);

/// A session whose user currently holds the guide role.
#[derive(Debug, Clone)]
pub struct GuideSession(pub AuthorizedIdentity);

/// A session whose user currently holds the admin role.
#[derive(Debug, Clone)]
pub struct AdminSession(pub AuthorizedIdentity);

impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(&state.cookie.name).map(|c| c.value());

        let identity = state.access.authenticate(token).map_err(|e| {
            debug!(path = %parts.uri.path(), error = %e, "Rejected unauthenticated request");
            ApiError::from(e)
        })?;

        Ok(Session(identity))
    }
}

impl FromRequestParts<AppState> for GuideSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Session(identity) = Session::from_request_parts(parts, state).await?;
        let authorized = state.access.require_guide(identity).await?;
        Ok(GuideSession(authorized))
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Session(identity) = Session::from_request_parts(parts, state).await?;
        let authorized = state.access.require_admin(identity).await?;
        Ok(AdminSession(authorized))
    }
}
