//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no SeaORM, no Axum).
//! Only domain types, normalization rules, pagination and repository traits.

pub mod errors;
pub mod pagination;
pub mod repositories;
pub mod rules;

pub use errors::DomainError;
pub use pagination::{Page, PageRequest, SortDirection, SortOrder};
pub use repositories::*;
