//! Repository implementations using SeaORM

pub mod customer_repository;
pub mod genre_repository;
pub mod movie_repository;
pub mod rental_repository;

pub use customer_repository::SeaOrmCustomerRepository;
pub use genre_repository::SeaOrmGenreRepository;
pub use movie_repository::SeaOrmMovieRepository;
pub use rental_repository::SeaOrmRentalRepository;

use sea_orm::{EntityTrait, Order, QueryOrder, Select};

use crate::domain::{DomainError, SortDirection, SortOrder};

/// Order by the resolved sort column, ties broken by primary key ascending.
fn ordered<E: EntityTrait>(
    query: Select<E>,
    column: E::Column,
    direction: SortDirection,
    primary_key: E::Column,
) -> Select<E> {
    let order = match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    };
    query.order_by(column, order).order_by_asc(primary_key)
}

fn unsupported_sort(sort: &SortOrder) -> DomainError {
    DomainError::InvalidArgument(format!("Unsupported sort property: {}", sort.property))
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}
