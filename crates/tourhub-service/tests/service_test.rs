//! End-to-end service tests over in-memory SurrealDB.

use chrono::{Duration, Utc};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use tourhub_core::error::TourError;
use tourhub_core::models::booking::{BookingRequest, TouristInfo, TripStatus, UpdateTrip};
use tourhub_core::models::package::{CreatePackage, Package};
use tourhub_core::models::review::ReviewRequest;
use tourhub_core::models::role::Role;
use tourhub_core::models::user::{CreateUser, User};
use tourhub_db::repository::{
    SurrealBookingRepository, SurrealPackageRepository, SurrealReviewRepository,
    SurrealUserRepository, SurrealWishlistRepository,
};
use tourhub_service::{
    BookingService, PackageService, ReviewService, UserService, WishlistService,
};
use uuid::Uuid;

struct Services {
    users: UserService<SurrealUserRepository<Db>>,
    packages: PackageService<SurrealPackageRepository<Db>>,
    bookings: BookingService<
        SurrealBookingRepository<Db>,
        SurrealPackageRepository<Db>,
        SurrealUserRepository<Db>,
    >,
    wishlist: WishlistService<SurrealWishlistRepository<Db>, SurrealPackageRepository<Db>>,
    reviews: ReviewService<SurrealReviewRepository<Db>>,
}

async fn setup() -> Services {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    tourhub_db::run_migrations(&db).await.unwrap();

    let users = SurrealUserRepository::new(db.clone());
    let packages = SurrealPackageRepository::new(db.clone());

    Services {
        users: UserService::new(users.clone()),
        packages: PackageService::new(packages.clone()),
        bookings: BookingService::new(
            SurrealBookingRepository::new(db.clone()),
            packages.clone(),
            users,
        ),
        wishlist: WishlistService::new(SurrealWishlistRepository::new(db.clone()), packages),
        reviews: ReviewService::new(SurrealReviewRepository::new(db)),
    }
}

async fn new_user(s: &Services, email: &str, role: Option<Role>) -> User {
    s.users
        .register(CreateUser {
            email: email.into(),
            name: "Someone".into(),
            photo_url: None,
            role,
        })
        .await
        .unwrap()
        .user
}

async fn new_package(s: &Services, kind: &str, thumb: &str) -> Package {
    s.packages
        .create(CreatePackage {
            package_type: kind.into(),
            title: format!("{kind} tour"),
            price: 250.0,
            thumbnail: thumb.into(),
            description: "Full day".into(),
        })
        .await
        .unwrap()
}

fn request(package_id: Uuid, email: &str, guide_id: Uuid) -> BookingRequest {
    BookingRequest {
        package_id,
        tourist_info: TouristInfo {
            email: email.into(),
            name: "Tess".into(),
        },
        guide_id,
        tour_date: Utc::now() + Duration::days(7),
    }
}

// -----------------------------------------------------------------------
// User registry
// -----------------------------------------------------------------------

#[tokio::test]
async fn registration_is_idempotent() {
    let s = setup().await;

    let first = s
        .users
        .register(CreateUser {
            email: "t@x.com".into(),
            name: "Tess".into(),
            photo_url: None,
            role: Some(Role::Guide),
        })
        .await
        .unwrap();
    assert_eq!(first.inserted_id, Some(first.user.id));
    assert!(first.message.is_none());

    let second = s
        .users
        .register(CreateUser {
            email: "t@x.com".into(),
            name: "Changed".into(),
            photo_url: Some("https://img.example.com/me.png".into()),
            role: None,
        })
        .await
        .unwrap();
    assert!(second.inserted_id.is_none());
    assert_eq!(second.user, first.user);
    assert_eq!(second.message.as_deref(), Some("Welcome back Tess as guide"));

    assert_eq!(s.users.list(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn registration_requires_email() {
    let s = setup().await;

    let err = s
        .users
        .register(CreateUser {
            email: "  ".into(),
            name: "Nobody".into(),
            photo_url: None,
            role: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, TourError::Validation { .. }));
}

#[tokio::test]
async fn role_of_unknown_user_is_none() {
    let s = setup().await;
    new_user(&s, "g@x.com", Some(Role::Guide)).await;

    assert_eq!(s.users.role_of("g@x.com").await.unwrap().role, Some(Role::Guide));
    assert_eq!(s.users.role_of("ghost@x.com").await.unwrap().role, None);
}

// -----------------------------------------------------------------------
// Bookings
// -----------------------------------------------------------------------

#[tokio::test]
async fn booking_status_then_cancel() {
    let s = setup().await;
    let p1 = new_package(&s, "hiking", "h1").await;
    let guide = new_user(&s, "g1@x.com", Some(Role::Guide)).await;

    let booking = s
        .bookings
        .create(request(p1.id, "t@x.com", guide.id))
        .await
        .unwrap();
    assert_eq!(booking.status, TripStatus::Pending);
    assert_eq!(booking.package_title, p1.title);
    assert_eq!(booking.guide_info.name, guide.name);

    let status = s.bookings.booking_status(p1.id, "t@x.com").await.unwrap();
    assert!(status.is_booked);
    assert_eq!(status.booking_id, Some(booking.id));
    assert_eq!(status.count_bookings, 1);

    s.bookings.cancel(booking.id, "t@x.com").await.unwrap();

    let status = s.bookings.booking_status(p1.id, "t@x.com").await.unwrap();
    assert!(!status.is_booked);
    assert_eq!(status.booking_id, None);
    assert_eq!(status.count_bookings, 0);

    let err = s.bookings.cancel(booking.id, "t@x.com").await.unwrap_err();
    assert!(matches!(err, TourError::NotFound { .. }));
}

#[tokio::test]
async fn booking_status_counts_all_bookings() {
    let s = setup().await;
    let p1 = new_package(&s, "hiking", "h1").await;
    let p2 = new_package(&s, "sports", "s1").await;
    let guide = new_user(&s, "g1@x.com", Some(Role::Guide)).await;

    s.bookings.create(request(p1.id, "u@y.com", guide.id)).await.unwrap();
    s.bookings.create(request(p2.id, "t@x.com", guide.id)).await.unwrap();

    let status = s.bookings.booking_status(p1.id, "t@x.com").await.unwrap();
    assert!(!status.is_booked);
    assert_eq!(status.count_bookings, 2);
}

#[tokio::test]
async fn booking_requires_existing_package_and_guide() {
    let s = setup().await;
    let p1 = new_package(&s, "hiking", "h1").await;
    let guide = new_user(&s, "g1@x.com", Some(Role::Guide)).await;
    let tourist = new_user(&s, "t@x.com", None).await;

    let err = s
        .bookings
        .create(request(Uuid::new_v4(), "t@x.com", guide.id))
        .await
        .unwrap_err();
    assert!(matches!(err, TourError::Validation { .. }));

    let err = s
        .bookings
        .create(request(p1.id, "t@x.com", tourist.id))
        .await
        .unwrap_err();
    assert!(matches!(err, TourError::Validation { .. }));

    let err = s
        .bookings
        .create(request(p1.id, "t@x.com", Uuid::new_v4()))
        .await
        .unwrap_err();
    assert!(matches!(err, TourError::Validation { .. }));
}

#[tokio::test]
async fn guide_updates_trip() {
    let s = setup().await;
    let p1 = new_package(&s, "hiking", "h1").await;
    let g1 = new_user(&s, "g1@x.com", Some(Role::Guide)).await;
    let g2 = new_user(&s, "g2@x.com", Some(Role::Guide)).await;

    let booking = s.bookings.create(request(p1.id, "t@x.com", g1.id)).await.unwrap();

    let trips = s.bookings.list_trips_for_guide(g1.id).await.unwrap();
    assert_eq!(trips.len(), 1);
    assert!(s.bookings.list_trips_for_guide(g2.id).await.unwrap().is_empty());

    // Another guide may still update it.
    let updated = s
        .bookings
        .update_trip(
            booking.id,
            UpdateTrip {
                status: Some(TripStatus::Accepted),
                ..Default::default()
            },
            Some(g2.id),
        )
        .await
        .unwrap();
    assert_eq!(updated.status, TripStatus::Accepted);

    let err = s
        .bookings
        .update_trip(booking.id, UpdateTrip::default(), Some(g1.id))
        .await
        .unwrap_err();
    assert!(matches!(err, TourError::Validation { .. }));

    let err = s
        .bookings
        .update_trip(
            Uuid::new_v4(),
            UpdateTrip {
                status: Some(TripStatus::Rejected),
                ..Default::default()
            },
            Some(g1.id),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TourError::NotFound { .. }));
}

#[tokio::test]
async fn tourist_lists_own_bookings() {
    let s = setup().await;
    let p1 = new_package(&s, "hiking", "h1").await;
    let guide = new_user(&s, "g1@x.com", Some(Role::Guide)).await;

    s.bookings.create(request(p1.id, "t@x.com", guide.id)).await.unwrap();
    s.bookings.create(request(p1.id, "u@y.com", guide.id)).await.unwrap();

    let mine = s.bookings.list_for_tourist("t@x.com").await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].tourist_info.email, "t@x.com");
}

// -----------------------------------------------------------------------
// Wishlist
// -----------------------------------------------------------------------

#[tokio::test]
async fn wishlist_is_scoped_to_email() {
    let s = setup().await;
    let p1 = new_package(&s, "hiking", "h1").await;
    let p2 = new_package(&s, "sports", "s1").await;

    s.wishlist.add(p1.id, "t@x.com").await.unwrap();
    s.wishlist.add(p1.id, "t@x.com").await.unwrap();
    s.wishlist.add(p2.id, "u@y.com").await.unwrap();

    let resolved = s.wishlist.resolve("t@x.com").await.unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].id, p1.id);

    assert!(s.wishlist.resolve("nobody@x.com").await.unwrap().is_empty());
}

#[tokio::test]
async fn removing_a_wish_clears_it_for_everyone() {
    let s = setup().await;
    let p1 = new_package(&s, "hiking", "h1").await;

    s.wishlist.add(p1.id, "t@x.com").await.unwrap();
    s.wishlist.add(p1.id, "u@y.com").await.unwrap();

    assert_eq!(s.wishlist.remove_by_package(p1.id).await.unwrap(), 2);
    assert!(s.wishlist.resolve("t@x.com").await.unwrap().is_empty());
    assert!(s.wishlist.resolve("u@y.com").await.unwrap().is_empty());
}

#[tokio::test]
async fn wishlist_skips_deleted_packages() {
    let s = setup().await;
    let p1 = new_package(&s, "hiking", "h1").await;
    let p2 = new_package(&s, "sports", "s1").await;

    s.wishlist.add(p1.id, "t@x.com").await.unwrap();
    s.wishlist.add(p2.id, "t@x.com").await.unwrap();
    s.packages.delete(p2.id).await.unwrap();

    let resolved = s.wishlist.resolve("t@x.com").await.unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].id, p1.id);
}

// -----------------------------------------------------------------------
// Catalog
// -----------------------------------------------------------------------

#[tokio::test]
async fn package_types_one_per_type() {
    let s = setup().await;
    new_package(&s, "hiking", "h1").await;
    new_package(&s, "sports", "s1").await;
    new_package(&s, "hiking", "h2").await;

    let mut types: Vec<String> = s
        .packages
        .package_types()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.package_type)
        .collect();
    types.sort();
    assert_eq!(types, vec!["hiking", "sports"]);
}

#[tokio::test]
async fn package_validation() {
    let s = setup().await;

    let err = s
        .packages
        .create(CreatePackage {
            package_type: "hiking".into(),
            title: " ".into(),
            price: 10.0,
            thumbnail: String::new(),
            description: String::new(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, TourError::Validation { .. }));

    let err = s.packages.get(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, TourError::NotFound { .. }));
}

// -----------------------------------------------------------------------
// Reviews
// -----------------------------------------------------------------------

#[tokio::test]
async fn review_author_comes_from_caller() {
    let s = setup().await;
    let guide = Uuid::new_v4();

    let review = s
        .reviews
        .create(
            ReviewRequest {
                guide_id: guide,
                rating: 4,
                comment: "Knew every trail".into(),
            },
            "t@x.com",
            None,
        )
        .await
        .unwrap();
    assert_eq!(review.author_email, "t@x.com");
    assert_eq!(review.author_name, "t@x.com");

    let listed = s.reviews.list_for_guide(guide).await.unwrap();
    assert_eq!(listed, vec![review]);
}

#[tokio::test]
async fn review_rating_out_of_range_is_rejected() {
    let s = setup().await;

    for rating in [0, 6] {
        let err = s
            .reviews
            .create(
                ReviewRequest {
                    guide_id: Uuid::new_v4(),
                    rating,
                    comment: String::new(),
                },
                "t@x.com",
                Some("Tess"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TourError::Validation { .. }));
    }
}
