//! Package catalog and the package type aggregator.

use std::collections::HashSet;

use tourhub_core::error::{TourError, TourResult};
use tourhub_core::models::package::{CreatePackage, Package, PackageTypeSummary, UpdatePackage};
use tourhub_core::repository::PackageRepository;
use tracing::info;
use uuid::Uuid;

pub struct PackageService<P: PackageRepository> {
    packages: P,
}

impl<P: PackageRepository> PackageService<P> {
    pub fn new(packages: P) -> Self {
        Self { packages }
    }

    pub async fn create(&self, input: CreatePackage) -> TourResult<Package> {
        require_text("type", &input.package_type)?;
        require_text("title", &input.title)?;
        check_price(input.price)?;

        let package = self.packages.create(input).await?;
        info!(package_id = %package.id, package_type = %package.package_type, "Package created");
        Ok(package)
    }

    pub async fn get(&self, id: Uuid) -> TourResult<Package> {
        self.packages.get_by_id(id).await
    }

    pub async fn update(&self, id: Uuid, input: UpdatePackage) -> TourResult<Package> {
        if let Some(package_type) = &input.package_type {
            require_text("type", package_type)?;
        }
        if let Some(title) = &input.title {
            require_text("title", title)?;
        }
        if let Some(price) = input.price {
            check_price(price)?;
        }

        let package = self.packages.update(id, input).await?;
        info!(package_id = %id, "Package updated");
        Ok(package)
    }

    pub async fn delete(&self, id: Uuid) -> TourResult<()> {
        self.packages.delete(id).await?;
        info!(package_id = %id, "Package deleted");
        Ok(())
    }

    /// One entry per distinct package type, carrying the thumbnail of
    /// the first package of that type in store order.
    pub async fn package_types(&self) -> TourResult<Vec<PackageTypeSummary>> {
        let packages = self.packages.list().await?;
        Ok(summarize_types(packages))
    }
}

fn summarize_types(packages: Vec<Package>) -> Vec<PackageTypeSummary> {
    let mut seen = HashSet::new();
    packages
        .into_iter()
        .filter(|p| seen.insert(p.package_type.clone()))
        .map(|p| PackageTypeSummary {
            package_type: p.package_type,
            thumbnail: p.thumbnail,
        })
        .collect()
}

fn require_text(field: &str, value: &str) -> TourResult<()> {
    if value.trim().is_empty() {
        return Err(TourError::validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn check_price(price: f64) -> TourResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(TourError::validation("price must be a non-negative number"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn package(kind: &str, thumb: &str) -> Package {
        Package {
            id: Uuid::new_v4(),
            package_type: kind.into(),
            title: "t".into(),
            price: 10.0,
            thumbnail: thumb.into(),
            description: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn first_thumbnail_wins() {
        let summary = summarize_types(vec![
            package("hiking", "h1"),
            package("sports", "s1"),
            package("hiking", "h2"),
        ]);

        assert_eq!(
            summary,
            vec![
                PackageTypeSummary {
                    package_type: "hiking".into(),
                    thumbnail: "h1".into()
                },
                PackageTypeSummary {
                    package_type: "sports".into(),
                    thumbnail: "s1".into()
                },
            ]
        );
    }

    #[test]
    fn empty_catalog_has_no_types() {
        assert!(summarize_types(Vec::new()).is_empty());
    }

    #[test]
    fn price_checks() {
        assert!(check_price(0.0).is_ok());
        assert!(check_price(-1.0).is_err());
        assert!(check_price(f64::NAN).is_err());
    }
}
