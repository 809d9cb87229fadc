//! SurrealDB implementation of [`PackageRepository`].

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tourhub_core::error::TourResult;
use tourhub_core::models::package::{CreatePackage, Package, UpdatePackage};
use tourhub_core::repository::PackageRepository;
use uuid::Uuid;

use super::parse_uuid;
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct PackageRow {
    package_type: String,
    title: String,
    price: f64,
    thumbnail: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct PackageRowWithId {
    record_id: String,
    package_type: String,
    title: String,
    price: f64,
    thumbnail: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PackageRow {
    fn into_package(self, id: Uuid) -> Package {
        Package {
            id,
            package_type: self.package_type,
            title: self.title,
            price: self.price,
            thumbnail: self.thumbnail,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl PackageRowWithId {
    fn try_into_package(self) -> Result<Package, DbError> {
        Ok(Package {
            id: parse_uuid(&self.record_id, "package")?,
            package_type: self.package_type,
            title: self.title,
            price: self.price,
            thumbnail: self.thumbnail,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn collect_packages(rows: Vec<PackageRowWithId>) -> Result<Vec<Package>, DbError> {
    rows.into_iter()
        .map(PackageRowWithId::try_into_package)
        .collect()
}

/// SurrealDB implementation of the Package repository.
#[derive(Clone)]
pub struct SurrealPackageRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPackageRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> PackageRepository for SurrealPackageRepository<C> {
    async fn create(&self, input: CreatePackage) -> TourResult<Package> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('package', $id) SET \
                 package_type = $package_type, title = $title, \
                 price = $price, thumbnail = $thumbnail, \
                 description = $description",
            )
            .bind(("id", id_str.clone()))
            .bind(("package_type", input.package_type))
            .bind(("title", input.title))
            .bind(("price", input.price))
            .bind(("thumbnail", input.thumbnail))
            .bind(("description", input.description))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement("package", e))?;

        let rows: Vec<PackageRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "package".into(),
            id: id_str,
        })?;

        Ok(row.into_package(id))
    }

    async fn get_by_id(&self, id: Uuid) -> TourResult<Package> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('package', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PackageRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "package".into(),
            id: id_str,
        })?;

        Ok(row.into_package(id))
    }

    async fn get_by_ids(&self, ids: &[Uuid]) -> TourResult<Vec<Package>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let id_strs: Vec<String> = ids.iter().map(Uuid::to_string).collect();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM package \
                 WHERE meta::id(id) IN $ids",
            )
            .bind(("ids", id_strs))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PackageRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(collect_packages(rows)?)
    }

    async fn update(&self, id: Uuid, input: UpdatePackage) -> TourResult<Package> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.package_type.is_some() {
            sets.push("package_type = $package_type");
        }
        if input.title.is_some() {
            sets.push("title = $title");
        }
        if input.price.is_some() {
            sets.push("price = $price");
        }
        if input.thumbnail.is_some() {
            sets.push("thumbnail = $thumbnail");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('package', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));
        if let Some(package_type) = input.package_type {
            builder = builder.bind(("package_type", package_type));
        }
        if let Some(title) = input.title {
            builder = builder.bind(("title", title));
        }
        if let Some(price) = input.price {
            builder = builder.bind(("price", price));
        }
        if let Some(thumbnail) = input.thumbnail {
            builder = builder.bind(("thumbnail", thumbnail));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement("package", e))?;

        let rows: Vec<PackageRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "package".into(),
            id: id_str,
        })?;

        Ok(row.into_package(id))
    }

    async fn delete(&self, id: Uuid) -> TourResult<()> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("DELETE type::record('package', $id) RETURN BEFORE")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let removed: Vec<PackageRow> = result.take(0).map_err(DbError::from)?;
        if removed.is_empty() {
            return Err(DbError::NotFound {
                entity: "package".into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }

    async fn list(&self) -> TourResult<Vec<Package>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM package ORDER BY created_at ASC")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PackageRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(collect_packages(rows)?)
    }
}
