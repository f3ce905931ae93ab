//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! The HTTP layer is the only place they are turned into status codes.

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Referenced customer, movie, genre, rental or rental detail does not exist
    #[error("{0}")]
    NotFound(String),

    /// Input breaks a business rule (age limit, missing birthdate, duplicate genre)
    #[error("{0}")]
    BusinessRule(String),

    /// Current ledger state forbids the operation (out of stock, already returned)
    #[error("{0}")]
    Conflict(String),

    /// Malformed request shape, e.g. an update with no fields
    #[error("{0}")]
    InvalidArgument(String),

    /// Schema-level constraint failures, field name -> message
    #[error("Validation failed")]
    FieldValidation(BTreeMap<String, String>),

    /// Database/persistence error
    #[error("Database error: {0}")]
    Database(String),
}

impl DomainError {
    pub fn customer_not_found(id: i32) -> Self {
        DomainError::NotFound(format!("Customer not found with ID: {}", id))
    }

    pub fn movie_not_found(id: i32) -> Self {
        DomainError::NotFound(format!("Movie not found with ID: {}", id))
    }

    pub fn genre_not_found(id: i32) -> Self {
        DomainError::NotFound(format!("Genre not found with ID: {}", id))
    }

    pub fn rental_not_found(id: i32) -> Self {
        DomainError::NotFound(format!("Rental not found with id: {}", id))
    }

    pub fn rental_detail_not_found(id: i32) -> Self {
        DomainError::NotFound(format!("RentalDetail not found with id: {}", id))
    }
}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_messages_name_entity_and_id() {
        assert_eq!(
            DomainError::customer_not_found(7).to_string(),
            "Customer not found with ID: 7"
        );
        assert_eq!(
            DomainError::rental_detail_not_found(3).to_string(),
            "RentalDetail not found with id: 3"
        );
    }

    #[test]
    fn db_errors_become_database_variant() {
        let err: DomainError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, DomainError::Database(ref m) if m.contains("boom")));
    }
}
