//! TourHub Core: domain models, repository traits and the shared error
//! type for the tour-package marketplace.

pub mod error;
pub mod models;
pub mod repository;
