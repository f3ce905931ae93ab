//! Services Layer
//!
//! Business workflows on top of the repository traits. Handlers call these;
//! they never touch SeaORM directly.

pub mod catalog_service;
pub mod customer_service;
pub mod rental_service;

use chrono::{Local, NaiveDate};

/// The store's calendar day, used for age checks, rental and return dates.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
