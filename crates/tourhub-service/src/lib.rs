//! TourHub services: the business rules sitting between the HTTP
//! surface and the repositories.
//!
//! Each service is generic over the repository traits from
//! `tourhub-core`, so none of them depends on a concrete store.

pub mod bookings;
pub mod catalog;
pub mod reviews;
pub mod users;
pub mod wishlist;

pub use bookings::BookingService;
pub use catalog::PackageService;
pub use reviews::ReviewService;
pub use users::UserService;
pub use wishlist::WishlistService;
