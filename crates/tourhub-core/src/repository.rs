//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async and act on a single record or a
//! single filter. Nothing here spans a transaction: callers that chain
//! writes must tolerate a partially applied sequence.

use uuid::Uuid;

use crate::error::TourResult;
use crate::models::{
    booking::{Booking, CreateBooking, UpdateTrip},
    package::{CreatePackage, Package, UpdatePackage},
    review::{CreateReview, Review},
    role::Role,
    user::{CreateUser, UpdateUser, User},
    wishlist::{CreateWishlistEntry, WishlistEntry},
};

pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with `AlreadyExists` if the email is
    /// taken.
    fn create(&self, input: CreateUser) -> impl Future<Output = TourResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = TourResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = TourResult<User>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateUser,
    ) -> impl Future<Output = TourResult<User>> + Send;
    /// Hard delete.
    fn delete(&self, id: Uuid) -> impl Future<Output = TourResult<()>> + Send;
    /// List users holding `role`, or all users when `role` is `None`.
    fn list_by_role(
        &self,
        role: Option<Role>,
    ) -> impl Future<Output = TourResult<Vec<User>>> + Send;
}

pub trait PackageRepository: Send + Sync {
    fn create(&self, input: CreatePackage) -> impl Future<Output = TourResult<Package>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = TourResult<Package>> + Send;
    /// Batched lookup of every package whose id is in `ids`. Unknown ids
    /// are skipped; the result order is store-defined.
    fn get_by_ids(&self, ids: &[Uuid]) -> impl Future<Output = TourResult<Vec<Package>>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdatePackage,
    ) -> impl Future<Output = TourResult<Package>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = TourResult<()>> + Send;
    /// All packages in store order.
    fn list(&self) -> impl Future<Output = TourResult<Vec<Package>>> + Send;
}

pub trait BookingRepository: Send + Sync {
    fn create(&self, input: CreateBooking) -> impl Future<Output = TourResult<Booking>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = TourResult<Booking>> + Send;
    /// First booking matching the exact (package, tourist email) pair.
    fn find_by_package_and_tourist(
        &self,
        package_id: Uuid,
        email: &str,
    ) -> impl Future<Output = TourResult<Option<Booking>>> + Send;
    fn list_by_tourist(&self, email: &str) -> impl Future<Output = TourResult<Vec<Booking>>> + Send;
    fn list_by_guide(&self, guide_id: Uuid) -> impl Future<Output = TourResult<Vec<Booking>>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateTrip,
    ) -> impl Future<Output = TourResult<Booking>> + Send;
    /// Delete by id. Fails with `NotFound` if nothing was removed.
    fn delete(&self, id: Uuid) -> impl Future<Output = TourResult<()>> + Send;
    /// Total number of bookings in the store.
    fn count(&self) -> impl Future<Output = TourResult<u64>> + Send;
}

pub trait WishlistRepository: Send + Sync {
    fn create(
        &self,
        input: CreateWishlistEntry,
    ) -> impl Future<Output = TourResult<WishlistEntry>> + Send;
    fn list_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = TourResult<Vec<WishlistEntry>>> + Send;
    /// Remove every entry pointing at `package_id`, for all users.
    /// Returns the number of removed entries.
    fn delete_by_package(&self, package_id: Uuid) -> impl Future<Output = TourResult<u64>> + Send;
}

pub trait ReviewRepository: Send + Sync {
    fn create(&self, input: CreateReview) -> impl Future<Output = TourResult<Review>> + Send;
    fn list_by_guide(&self, guide_id: Uuid) -> impl Future<Output = TourResult<Vec<Review>>> + Send;
}
