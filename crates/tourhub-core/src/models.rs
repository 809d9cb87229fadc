//! Domain models for TourHub.
//!
//! These are the core types shared across all crates. JSON
//! representations use camelCase keys.

pub mod booking;
pub mod package;
pub mod review;
pub mod role;
pub mod user;
pub mod wishlist;
