//! Booking ("trip") domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TourError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Completed,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Pending => "pending",
            TripStatus::Accepted => "accepted",
            TripStatus::Rejected => "rejected",
            TripStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TripStatus {
    type Err = TourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TripStatus::Pending),
            "accepted" => Ok(TripStatus::Accepted),
            "rejected" => Ok(TripStatus::Rejected),
            "completed" => Ok(TripStatus::Completed),
            other => Err(TourError::validation(format!("unknown trip status: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TouristInfo {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GuideInfo {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub package_id: Uuid,
    /// Snapshot of the package title at booking time.
    pub package_title: String,
    /// Snapshot of the package price at booking time.
    pub price: f64,
    pub tourist_info: TouristInfo,
    pub guide_info: GuideInfo,
    pub tour_date: DateTime<Utc>,
    pub status: TripStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Booking request as submitted by a tourist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub package_id: Uuid,
    pub tourist_info: TouristInfo,
    pub guide_id: Uuid,
    pub tour_date: DateTime<Utc>,
}

/// Fully resolved booking ready to be stored.
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub package_id: Uuid,
    pub package_title: String,
    pub price: f64,
    pub tourist_info: TouristInfo,
    pub guide_info: GuideInfo,
    pub tour_date: DateTime<Utc>,
}

/// Partial trip update applied by a guide.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTrip {
    pub status: Option<TripStatus>,
    pub tour_date: Option<DateTime<Utc>>,
}

/// Result of the booking-status check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatus {
    pub is_booked: bool,
    pub booking_id: Option<Uuid>,
    /// Total number of bookings in the store, not scoped to the user.
    pub count_bookings: u64,
}
