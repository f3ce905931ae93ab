//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use super::{DomainError, Page, PageRequest};

/// Customer data for API responses
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub customer_id: i32,
    pub customer_name: String,
    pub is_subscribed_to_newsletter: bool,
    pub birthdate: NaiveDate,
    pub created_date: String,
    pub modified_date: String,
}

/// Input for creating a customer (already age-validated)
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub customer_name: String,
    pub birthdate: NaiveDate,
    pub is_subscribed_to_newsletter: bool,
}

/// Partial update: `None` leaves the stored value untouched
#[derive(Debug, Clone, Default)]
pub struct CustomerPatch {
    pub customer_name: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub is_subscribed_to_newsletter: Option<bool>,
}

impl CustomerPatch {
    pub fn has_updates(&self) -> bool {
        self.customer_name.is_some()
            || self.birthdate.is_some()
            || self.is_subscribed_to_newsletter.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    pub genre_id: i32,
    pub genre_name: String,
    pub created_date: String,
    pub modified_date: String,
}

/// Movie data for API responses
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub movie_id: i32,
    pub movie_name: String,
    pub genre_id: i32,
    pub genre: String,
    pub release_date: NaiveDate,
    pub date_added: NaiveDate,
    pub number_in_stock: i32,
    pub number_available: i32,
    pub created_date: String,
    pub modified_date: String,
}

/// Input for creating a movie; counters are clamped by the store
#[derive(Debug, Clone)]
pub struct NewMovie {
    pub movie_name: String,
    pub genre_id: i32,
    pub release_date: NaiveDate,
    pub date_added: NaiveDate,
    pub number_in_stock: i32,
    pub number_available: i32,
}

/// One rented copy inside a rental
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalItem {
    pub rental_detail_id: i32,
    pub movie_id: i32,
    pub movie_name: String,
    pub genre: String,
    pub date_returned: Option<NaiveDate>,
}

/// Rental header with its items
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    pub rental_id: i32,
    pub customer_id: i32,
    pub customer_name: String,
    pub date_rented: NaiveDate,
    pub created_date: String,
    pub modified_date: String,
    pub status: String,
    pub rent_details: Vec<RentalItem>,
}

/// Input for a checkout
#[derive(Debug, Clone)]
pub struct NewRental {
    pub customer_id: i32,
    pub movie_ids: Vec<i32>,
    pub date_rented: NaiveDate,
}

/// Repository trait for Customer entity
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// One page of customers in the requested order
    async fn find_page(&self, request: &PageRequest) -> Result<Page<Customer>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError>;

    /// Insert a customer, name is normalized on write
    async fn create(&self, input: NewCustomer) -> Result<Customer, DomainError>;

    /// Persist the given field values and bump the modification timestamp
    async fn update(&self, customer: Customer) -> Result<Customer, DomainError>;
}

/// Repository trait for Genre entity
#[async_trait]
pub trait GenreRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Genre>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, DomainError>;

    async fn create(&self, name: String) -> Result<Genre, DomainError>;
}

/// Repository trait for Movie entity
#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn find_page(&self, request: &PageRequest) -> Result<Page<Movie>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Movie>, DomainError>;

    /// Insert a movie; name and stock counters are normalized on write
    async fn create(&self, input: NewMovie) -> Result<Movie, DomainError>;

    /// Overwrite both stock counters (clamped)
    async fn update_stock(
        &self,
        id: i32,
        number_in_stock: i32,
        number_available: i32,
    ) -> Result<Movie, DomainError>;
}

/// Repository trait for the rental ledger
///
/// Both write operations are atomic: every row they touch commits or none does.
#[async_trait]
pub trait RentalRepository: Send + Sync {
    async fn find_page(&self, request: &PageRequest) -> Result<Page<Rental>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Rental>, DomainError>;

    /// Check out one copy per movie id and record the rental
    async fn create(&self, input: NewRental) -> Result<Rental, DomainError>;

    /// Mark one item returned and put its copy back on the shelf
    async fn return_item(
        &self,
        rental_id: i32,
        rental_detail_id: i32,
        returned_on: NaiveDate,
    ) -> Result<Rental, DomainError>;
}
