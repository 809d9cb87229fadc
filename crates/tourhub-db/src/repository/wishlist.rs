//! SurrealDB implementation of [`WishlistRepository`].

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tourhub_core::error::TourResult;
use tourhub_core::models::wishlist::{CreateWishlistEntry, WishlistEntry};
use tourhub_core::repository::WishlistRepository;
use uuid::Uuid;

use super::parse_uuid;
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct WishlistRow {
    package_id: String,
    email: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct WishlistRowWithId {
    record_id: String,
    package_id: String,
    email: String,
    created_at: DateTime<Utc>,
}

impl WishlistRow {
    fn into_entry(self, id: Uuid) -> Result<WishlistEntry, DbError> {
        Ok(WishlistEntry {
            id,
            package_id: parse_uuid(&self.package_id, "package")?,
            email: self.email,
            created_at: self.created_at,
        })
    }
}

impl WishlistRowWithId {
    fn try_into_entry(self) -> Result<WishlistEntry, DbError> {
        Ok(WishlistEntry {
            id: parse_uuid(&self.record_id, "wishlist")?,
            package_id: parse_uuid(&self.package_id, "package")?,
            email: self.email,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the Wishlist repository.
#[derive(Clone)]
pub struct SurrealWishlistRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealWishlistRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> WishlistRepository for SurrealWishlistRepository<C> {
    async fn create(&self, input: CreateWishlistEntry) -> TourResult<WishlistEntry> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('wishlist', $id) SET \
                 package_id = $package_id, email = $email",
            )
            .bind(("id", id_str.clone()))
            .bind(("package_id", input.package_id.to_string()))
            .bind(("email", input.email))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement("wishlist", e))?;

        let rows: Vec<WishlistRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "wishlist".into(),
            id: id_str,
        })?;

        Ok(row.into_entry(id)?)
    }

    async fn list_by_email(&self, email: &str) -> TourResult<Vec<WishlistEntry>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM wishlist \
                 WHERE email = $email ORDER BY created_at ASC",
            )
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<WishlistRowWithId> = result.take(0).map_err(DbError::from)?;

        let entries = rows
            .into_iter()
            .map(WishlistRowWithId::try_into_entry)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(entries)
    }

    async fn delete_by_package(&self, package_id: Uuid) -> TourResult<u64> {
        let mut result = self
            .db
            .query("DELETE wishlist WHERE package_id = $package_id RETURN BEFORE")
            .bind(("package_id", package_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let removed: Vec<WishlistRow> = result.take(0).map_err(DbError::from)?;
        Ok(removed.len() as u64)
    }
}
