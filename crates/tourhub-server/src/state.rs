//! Shared application state handed to every handler.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use tourhub_auth::{AccessControl, AuthConfig};
use tourhub_db::repository::{
    SurrealBookingRepository, SurrealPackageRepository, SurrealReviewRepository,
    SurrealUserRepository, SurrealWishlistRepository,
};
use tourhub_service::{
    BookingService, PackageService, ReviewService, UserService, WishlistService,
};

use crate::config::RunningEnvironment;

type Users = SurrealUserRepository<Any>;
type Packages = SurrealPackageRepository<Any>;
type Bookings = SurrealBookingRepository<Any>;
type Wishlist = SurrealWishlistRepository<Any>;
type Reviews = SurrealReviewRepository<Any>;

/// How the session cookie is written.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub environment: RunningEnvironment,
}

#[derive(Clone)]
pub struct AppState {
    pub access: Arc<AccessControl<Users>>,
    pub users: Arc<UserService<Users>>,
    pub packages: Arc<PackageService<Packages>>,
    pub bookings: Arc<BookingService<Bookings, Packages, Users>>,
    pub wishlist: Arc<WishlistService<Wishlist, Packages>>,
    pub reviews: Arc<ReviewService<Reviews>>,
    pub cookie: Arc<CookieSettings>,
}

impl AppState {
    /// Wire every service onto one database handle.
    pub fn new(db: Surreal<Any>, auth: AuthConfig, cookie: CookieSettings) -> Self {
        let users = SurrealUserRepository::new(db.clone());
        let packages = SurrealPackageRepository::new(db.clone());

        Self {
            access: Arc::new(AccessControl::new(users.clone(), auth)),
            users: Arc::new(UserService::new(users.clone())),
            packages: Arc::new(PackageService::new(packages.clone())),
            bookings: Arc::new(BookingService::new(
                SurrealBookingRepository::new(db.clone()),
                packages.clone(),
                users,
            )),
            wishlist: Arc::new(WishlistService::new(
                SurrealWishlistRepository::new(db.clone()),
                packages,
            )),
            reviews: Arc::new(ReviewService::new(SurrealReviewRepository::new(db))),
            cookie: Arc::new(cookie),
        }
    }
}
