use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::Cookie;
use serde_json::{Value, json};
use time::Duration;
use tourhub_auth::IdentityClaims;

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::state::{AppState, CookieSettings};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/session", post(sign_in))
        .route("/session/logout", post(logout))
}

fn session_cookie(settings: &CookieSettings, value: String) -> Cookie<'static> {
    Cookie::build((settings.name.clone(), value))
        .path("/")
        .http_only(true)
        .secure(settings.environment.secure_cookies())
        .same_site(settings.environment.same_site())
        .build()
}

/// The cookie lives exactly as long as the token it carries.
fn signed_in_cookie(
    settings: &CookieSettings,
    token: String,
    lifetime_secs: u64,
) -> Cookie<'static> {
    let lifetime = i64::try_from(lifetime_secs).unwrap_or(i64::MAX);
    let mut cookie = session_cookie(settings, token);
    cookie.set_max_age(Duration::seconds(lifetime));
    cookie
}

async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(identity): ApiJson<IdentityClaims>,
) -> ApiResult<(CookieJar, Json<Value>)> {
    let grant = state.access.sign_in(identity)?;
    let jar = jar.add(signed_in_cookie(&state.cookie, grant.token, grant.expires_in));

    Ok((
        jar,
        Json(json!({ "success": true, "expiresIn": grant.expires_in })),
    ))
}

async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<Value>) {
    let jar = jar.remove(session_cookie(&state.cookie, String::new()));
    (jar, Json(json!({ "success": true })))
}
