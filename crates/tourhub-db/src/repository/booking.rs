//! SurrealDB implementation of [`BookingRepository`].
//!
//! Tourist and guide info are stored flattened (`tourist_email`,
//! `guide_id`, ...) so they can be indexed and filtered directly.

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tourhub_core::error::TourResult;
use tourhub_core::models::booking::{
    Booking, CreateBooking, GuideInfo, TouristInfo, TripStatus, UpdateTrip,
};
use tourhub_core::repository::BookingRepository;
use uuid::Uuid;

use super::{CountRow, parse_uuid};
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct BookingRow {
    package_id: String,
    package_title: String,
    price: f64,
    tourist_email: String,
    tourist_name: String,
    guide_id: String,
    guide_name: String,
    tour_date: DateTime<Utc>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct BookingRowWithId {
    record_id: String,
    package_id: String,
    package_title: String,
    price: f64,
    tourist_email: String,
    tourist_name: String,
    guide_id: String,
    guide_name: String,
    tour_date: DateTime<Utc>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_status(s: &str) -> Result<TripStatus, DbError> {
    s.parse::<TripStatus>()
        .map_err(|_| DbError::Decode(format!("unknown trip status: {s}")))
}

impl BookingRow {
    fn into_booking(self, id: Uuid) -> Result<Booking, DbError> {
        Ok(Booking {
            id,
            package_id: parse_uuid(&self.package_id, "package")?,
            package_title: self.package_title,
            price: self.price,
            tourist_info: TouristInfo {
                email: self.tourist_email,
                name: self.tourist_name,
            },
            guide_info: GuideInfo {
                id: parse_uuid(&self.guide_id, "guide")?,
                name: self.guide_name,
            },
            tour_date: self.tour_date,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl BookingRowWithId {
    fn try_into_booking(self) -> Result<Booking, DbError> {
        let id = parse_uuid(&self.record_id, "booking")?;
        BookingRow {
            package_id: self.package_id,
            package_title: self.package_title,
            price: self.price,
            tourist_email: self.tourist_email,
            tourist_name: self.tourist_name,
            guide_id: self.guide_id,
            guide_name: self.guide_name,
            tour_date: self.tour_date,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_booking(id)
    }
}

fn collect_bookings(rows: Vec<BookingRowWithId>) -> Result<Vec<Booking>, DbError> {
    rows.into_iter()
        .map(BookingRowWithId::try_into_booking)
        .collect()
}

/// SurrealDB implementation of the Booking repository.
#[derive(Clone)]
pub struct SurrealBookingRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealBookingRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> BookingRepository for SurrealBookingRepository<C> {
    async fn create(&self, input: CreateBooking) -> TourResult<Booking> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('booking', $id) SET \
                 package_id = $package_id, \
                 package_title = $package_title, \
                 price = $price, \
                 tourist_email = $tourist_email, \
                 tourist_name = $tourist_name, \
                 guide_id = $guide_id, \
                 guide_name = $guide_name, \
                 tour_date = $tour_date, \
                 status = $status",
            )
            .bind(("id", id_str.clone()))
            .bind(("package_id", input.package_id.to_string()))
            .bind(("package_title", input.package_title))
            .bind(("price", input.price))
            .bind(("tourist_email", input.tourist_info.email))
            .bind(("tourist_name", input.tourist_info.name))
            .bind(("guide_id", input.guide_info.id.to_string()))
            .bind(("guide_name", input.guide_info.name))
            .bind(("tour_date", input.tour_date))
            .bind(("status", TripStatus::Pending.as_str().to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement("booking", e))?;

        let rows: Vec<BookingRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "booking".into(),
            id: id_str,
        })?;

        Ok(row.into_booking(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> TourResult<Booking> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('booking', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BookingRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "booking".into(),
            id: id_str,
        })?;

        Ok(row.into_booking(id)?)
    }

    async fn find_by_package_and_tourist(
        &self,
        package_id: Uuid,
        email: &str,
    ) -> TourResult<Option<Booking>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM booking \
                 WHERE package_id = $package_id AND tourist_email = $email \
                 ORDER BY created_at ASC LIMIT 1",
            )
            .bind(("package_id", package_id.to_string()))
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BookingRowWithId> = result.take(0).map_err(DbError::from)?;
        let booking = rows
            .into_iter()
            .next()
            .map(BookingRowWithId::try_into_booking)
            .transpose()?;

        Ok(booking)
    }

    async fn list_by_tourist(&self, email: &str) -> TourResult<Vec<Booking>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM booking \
                 WHERE tourist_email = $email ORDER BY created_at ASC",
            )
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BookingRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(collect_bookings(rows)?)
    }

    async fn list_by_guide(&self, guide_id: Uuid) -> TourResult<Vec<Booking>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM booking \
                 WHERE guide_id = $guide_id ORDER BY created_at ASC",
            )
            .bind(("guide_id", guide_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BookingRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(collect_bookings(rows)?)
    }

    async fn update(&self, id: Uuid, input: UpdateTrip) -> TourResult<Booking> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.status.is_some() {
            sets.push("status = $status");
        }
        if input.tour_date.is_some() {
            sets.push("tour_date = $tour_date");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('booking', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));
        if let Some(status) = input.status {
            builder = builder.bind(("status", status.as_str().to_string()));
        }
        if let Some(tour_date) = input.tour_date {
            builder = builder.bind(("tour_date", tour_date));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::from_statement("booking", e))?;

        let rows: Vec<BookingRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "booking".into(),
            id: id_str,
        })?;

        Ok(row.into_booking(id)?)
    }

    async fn delete(&self, id: Uuid) -> TourResult<()> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("DELETE type::record('booking', $id) RETURN BEFORE")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let removed: Vec<BookingRow> = result.take(0).map_err(DbError::from)?;
        if removed.is_empty() {
            return Err(DbError::NotFound {
                entity: "booking".into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }

    async fn count(&self) -> TourResult<u64> {
        let mut result = self
            .db
            .query("SELECT count() AS total FROM booking GROUP ALL")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }
}
