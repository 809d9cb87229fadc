//! Booking state manager.
//!
//! Bookings start out `pending`. Tourists create and cancel them; guides
//! move them through the remaining states.

use tourhub_core::error::{TourError, TourResult};
use tourhub_core::models::booking::{
    Booking, BookingRequest, BookingStatus, CreateBooking, GuideInfo, UpdateTrip,
};
use tourhub_core::models::role::Role;
use tourhub_core::repository::{BookingRepository, PackageRepository, UserRepository};
use tracing::{info, warn};
use uuid::Uuid;

pub struct BookingService<B, P, U>
where
    B: BookingRepository,
    P: PackageRepository,
    U: UserRepository,
{
    bookings: B,
    packages: P,
    users: U,
}

impl<B, P, U> BookingService<B, P, U>
where
    B: BookingRepository,
    P: PackageRepository,
    U: UserRepository,
{
    pub fn new(bookings: B, packages: P, users: U) -> Self {
        Self {
            bookings,
            packages,
            users,
        }
    }

    /// Create a pending booking.
    ///
    /// The package must exist and the guide must be a user holding the
    /// guide role. The package title and price are copied onto the
    /// booking; later catalog edits do not touch it.
    pub async fn create(&self, request: BookingRequest) -> TourResult<Booking> {
        let email = request.tourist_info.email.trim().to_string();
        if email.is_empty() {
            return Err(TourError::validation("touristInfo.email is required"));
        }

        let package = match self.packages.get_by_id(request.package_id).await {
            Ok(p) => p,
            Err(TourError::NotFound { .. }) => {
                return Err(TourError::validation(format!(
                    "package {} does not exist",
                    request.package_id
                )));
            }
            Err(e) => return Err(e),
        };

        let guide = match self.users.get_by_id(request.guide_id).await {
            Ok(u) if u.effective_role() == Role::Guide => u,
            Ok(_) | Err(TourError::NotFound { .. }) => {
                return Err(TourError::validation(format!(
                    "user {} is not a guide",
                    request.guide_id
                )));
            }
            Err(e) => return Err(e),
        };

        let mut tourist_info = request.tourist_info;
        tourist_info.email = email;

        let booking = self
            .bookings
            .create(CreateBooking {
                package_id: package.id,
                package_title: package.title,
                price: package.price,
                tourist_info,
                guide_info: GuideInfo {
                    id: guide.id,
                    name: guide.name,
                },
                tour_date: request.tour_date,
            })
            .await?;

        info!(
            booking_id = %booking.id,
            package_id = %booking.package_id,
            guide_id = %booking.guide_info.id,
            "Booking created"
        );
        Ok(booking)
    }

    /// Delete a booking by id on behalf of `caller_email`.
    ///
    /// Any authenticated caller may cancel; a caller other than the
    /// booking's tourist is only logged.
    pub async fn cancel(&self, booking_id: Uuid, caller_email: &str) -> TourResult<()> {
        let booking = self.bookings.get_by_id(booking_id).await?;
        if booking.tourist_info.email != caller_email {
            warn!(
                %booking_id,
                caller = %caller_email,
                owner = %booking.tourist_info.email,
                "Booking cancelled by someone other than its tourist"
            );
        }

        self.bookings.delete(booking_id).await?;
        info!(%booking_id, "Booking cancelled");
        Ok(())
    }

    pub async fn booking_status(&self, package_id: Uuid, email: &str) -> TourResult<BookingStatus> {
        let existing = self
            .bookings
            .find_by_package_and_tourist(package_id, email)
            .await?;
        let count_bookings = self.bookings.count().await?;

        Ok(BookingStatus {
            is_booked: existing.is_some(),
            booking_id: existing.map(|b| b.id),
            count_bookings,
        })
    }

    pub async fn list_for_tourist(&self, email: &str) -> TourResult<Vec<Booking>> {
        self.bookings.list_by_tourist(email).await
    }

    pub async fn list_trips_for_guide(&self, guide_id: Uuid) -> TourResult<Vec<Booking>> {
        self.bookings.list_by_guide(guide_id).await
    }

    /// Apply a guide's partial update to a booking.
    ///
    /// `acting_guide` is the user id of the guide making the change, if
    /// known. It is not required to match the booking's guide.
    pub async fn update_trip(
        &self,
        booking_id: Uuid,
        patch: UpdateTrip,
        acting_guide: Option<Uuid>,
    ) -> TourResult<Booking> {
        if patch.status.is_none() && patch.tour_date.is_none() {
            return Err(TourError::validation("no fields to update"));
        }

        let booking = self.bookings.get_by_id(booking_id).await?;
        if acting_guide.is_some_and(|id| id != booking.guide_info.id) {
            warn!(
                %booking_id,
                acting_guide = ?acting_guide,
                assigned_guide = %booking.guide_info.id,
                "Trip updated by a guide it is not assigned to"
            );
        }

        let updated = self.bookings.update(booking_id, patch).await?;
        info!(%booking_id, status = %updated.status, "Trip updated");
        Ok(updated)
    }
}
