//! Wishlist linker: a user/package join resolved in two steps.

use std::collections::HashSet;

use tourhub_core::error::{TourError, TourResult};
use tourhub_core::models::package::Package;
use tourhub_core::models::wishlist::{CreateWishlistEntry, WishlistEntry};
use tourhub_core::repository::{PackageRepository, WishlistRepository};
use tracing::{debug, info};
use uuid::Uuid;

pub struct WishlistService<W: WishlistRepository, P: PackageRepository> {
    wishlist: W,
    packages: P,
}

impl<W: WishlistRepository, P: PackageRepository> WishlistService<W, P> {
    pub fn new(wishlist: W, packages: P) -> Self {
        Self { wishlist, packages }
    }

    /// Add `package_id` to the wishlist of `email`. Duplicates are kept.
    pub async fn add(&self, package_id: Uuid, email: &str) -> TourResult<WishlistEntry> {
        let email = email.trim();
        if email.is_empty() {
            return Err(TourError::validation("email is required"));
        }

        let entry = self
            .wishlist
            .create(CreateWishlistEntry {
                package_id,
                email: email.to_string(),
            })
            .await?;
        debug!(%package_id, %email, "Wish added");
        Ok(entry)
    }

    /// Every package wished for by `email`, each listed once.
    pub async fn resolve(&self, email: &str) -> TourResult<Vec<Package>> {
        let entries = self.wishlist.list_by_email(email).await?;
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let mut seen = HashSet::new();
        let ids: Vec<Uuid> = entries
            .into_iter()
            .map(|e| e.package_id)
            .filter(|id| seen.insert(*id))
            .collect();

        self.packages.get_by_ids(&ids).await
    }

    /// Drop `package_id` from every wishlist. Returns the number of
    /// removed entries.
    pub async fn remove_by_package(&self, package_id: Uuid) -> TourResult<u64> {
        let removed = self.wishlist.delete_by_package(package_id).await?;
        info!(%package_id, removed, "Wishes removed");
        Ok(removed)
    }
}
