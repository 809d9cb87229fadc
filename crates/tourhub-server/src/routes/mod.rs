//! Route table.

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

mod bookings;
mod packages;
mod reviews;
mod session;
mod users;
mod wishlist;

pub const BANNER: &str = "TourHub server is running";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(banner))
        .merge(session::routes())
        .merge(users::routes())
        .merge(bookings::routes())
        .merge(wishlist::routes())
        .merge(packages::routes())
        .merge(reviews::routes())
}

async fn banner() -> &'static str {
    BANNER
}
