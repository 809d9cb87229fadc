//! SurrealDB repository implementations.

mod booking;
mod package;
mod review;
mod user;
mod wishlist;

pub use booking::SurrealBookingRepository;
pub use package::SurrealPackageRepository;
pub use review::SurrealReviewRepository;
pub use user::SurrealUserRepository;
pub use wishlist::SurrealWishlistRepository;

use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
pub(crate) struct CountRow {
    pub(crate) total: u64,
}

pub(crate) fn parse_uuid(value: &str, what: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(value).map_err(|e| DbError::Decode(format!("invalid {what} UUID: {e}")))
}
