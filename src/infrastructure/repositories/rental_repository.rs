//! SeaORM implementation of RentalRepository (the rental ledger)
//!
//! A rental is stored as one `rental_headers` row plus one `rental_details`
//! row per rented copy. Reads assemble the aggregate in batch; writes run in a
//! single transaction together with the movie stock counters.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use super::movie_repository::{return_copy, take_copy};
use super::{now, ordered, unsupported_sort};
use crate::domain::rules::rental_status;
use crate::domain::{
    DomainError, NewRental, Page, PageRequest, Rental, RentalItem, RentalRepository,
};
use crate::models::customer::{self, Entity as CustomerEntity};
use crate::models::genre::{self, Entity as GenreEntity};
use crate::models::movie::{self, Entity as MovieEntity};
use crate::models::rental_detail::{self, Entity as RentalDetailEntity};
use crate::models::rental_header::{self, Entity as RentalHeaderEntity};

/// SeaORM-based implementation of RentalRepository
pub struct SeaOrmRentalRepository {
    db: DatabaseConnection,
}

impl SeaOrmRentalRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn sort_column(property: &str) -> Option<rental_header::Column> {
    match property {
        "rentalId" | "id" => Some(rental_header::Column::Id),
        "dateRented" => Some(rental_header::Column::DateRented),
        "customerId" => Some(rental_header::Column::CustomerId),
        "createdDate" => Some(rental_header::Column::CreatedAt),
        "modifiedDate" => Some(rental_header::Column::UpdatedAt),
        _ => None,
    }
}

fn out_of_stock(movie: &movie::Model) -> DomainError {
    DomainError::Conflict(format!(
        "Movie '{}' is out of stock. Available: {}",
        movie.movie_name, movie.number_available
    ))
}

/// Assemble rental aggregates for the given headers, keeping their order.
async fn load_rentals<C: ConnectionTrait>(
    conn: &C,
    headers: Vec<rental_header::Model>,
) -> Result<Vec<Rental>, DomainError> {
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let header_ids: Vec<i32> = headers.iter().map(|h| h.id).collect();
    let customer_ids: Vec<i32> = headers.iter().map(|h| h.customer_id).collect();

    let customer_names: HashMap<i32, String> = CustomerEntity::find()
        .filter(customer::Column::Id.is_in(customer_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|c| (c.id, c.customer_name))
        .collect();

    let details = RentalDetailEntity::find()
        .filter(rental_detail::Column::RentalId.is_in(header_ids))
        .order_by_asc(rental_detail::Column::Id)
        .find_also_related(MovieEntity)
        .all(conn)
        .await?;

    let genre_ids: Vec<i32> = details
        .iter()
        .filter_map(|(_, m)| m.as_ref().map(|m| m.genre_id))
        .collect();

    let mut genre_names: HashMap<i32, String> = HashMap::new();
    if !genre_ids.is_empty() {
        for g in GenreEntity::find()
            .filter(genre::Column::Id.is_in(genre_ids))
            .all(conn)
            .await?
        {
            genre_names.insert(g.id, g.genre_name);
        }
    }

    let mut items_by_rental: HashMap<i32, Vec<RentalItem>> = HashMap::new();
    for (detail, movie) in details {
        let genre = movie
            .as_ref()
            .and_then(|m| genre_names.get(&m.genre_id).cloned())
            .unwrap_or_else(|| "Unknown".to_string());
        let movie_name = movie
            .map(|m| m.movie_name)
            .unwrap_or_else(|| "Unknown".to_string());

        items_by_rental
            .entry(detail.rental_id)
            .or_default()
            .push(RentalItem {
                rental_detail_id: detail.id,
                movie_id: detail.movie_id,
                movie_name,
                genre,
                date_returned: detail.date_returned,
            });
    }

    let rentals = headers
        .into_iter()
        .map(|header| {
            let rent_details = items_by_rental.remove(&header.id).unwrap_or_default();
            let status = rental_status(rent_details.iter().map(|i| &i.date_returned));
            Rental {
                rental_id: header.id,
                customer_id: header.customer_id,
                customer_name: customer_names
                    .get(&header.customer_id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown".to_string()),
                date_rented: header.date_rented,
                created_date: header.created_at,
                modified_date: header.updated_at,
                status: status.to_string(),
                rent_details,
            }
        })
        .collect();

    Ok(rentals)
}

async fn load_rental<C: ConnectionTrait>(
    conn: &C,
    header: rental_header::Model,
) -> Result<Rental, DomainError> {
    let id = header.id;
    load_rentals(conn, vec![header])
        .await?
        .pop()
        .ok_or_else(|| DomainError::rental_not_found(id))
}

#[async_trait]
impl RentalRepository for SeaOrmRentalRepository {
    async fn find_page(&self, request: &PageRequest) -> Result<Page<Rental>, DomainError> {
        let column = sort_column(&request.sort.property)
            .ok_or_else(|| unsupported_sort(&request.sort))?;
        let query = ordered(
            RentalHeaderEntity::find(),
            column,
            request.sort.direction,
            rental_header::Column::Id,
        );

        let paginator = query.paginate(&self.db, request.size);
        let total = paginator.num_items().await?;
        let headers = paginator.fetch_page(request.page).await?;

        let rentals = load_rentals(&self.db, headers).await?;
        Ok(Page::new(rentals, request, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Rental>, DomainError> {
        match RentalHeaderEntity::find_by_id(id).one(&self.db).await? {
            Some(header) => Ok(Some(load_rental(&self.db, header).await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, input: NewRental) -> Result<Rental, DomainError> {
        // Dropping the transaction on an early return rolls everything back
        let txn = self.db.begin().await?;

        // 1. Customer must exist
        let customer = CustomerEntity::find_by_id(input.customer_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DomainError::customer_not_found(input.customer_id))?;

        // 2. Validation pass over every requested movie before any mutation
        for &movie_id in &input.movie_ids {
            let movie = MovieEntity::find_by_id(movie_id)
                .one(&txn)
                .await?
                .ok_or_else(|| DomainError::movie_not_found(movie_id))?;

            if movie.number_available <= 0 {
                return Err(out_of_stock(&movie));
            }
        }

        // 3. Header
        let now = now();
        let header = rental_header::ActiveModel {
            customer_id: Set(customer.id),
            date_rented: Set(input.date_rented),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        // 4. One detail per copy; duplicates each take their own copy
        for &movie_id in &input.movie_ids {
            if !take_copy(&txn, movie_id).await? {
                let movie = MovieEntity::find_by_id(movie_id)
                    .one(&txn)
                    .await?
                    .ok_or_else(|| DomainError::movie_not_found(movie_id))?;
                return Err(out_of_stock(&movie));
            }

            rental_detail::ActiveModel {
                rental_id: Set(header.id),
                movie_id: Set(movie_id),
                date_returned: Set(None),
                created_at: Set(now.clone()),
                updated_at: Set(now.clone()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        let rental = load_rental(&txn, header).await?;
        txn.commit().await?;

        Ok(rental)
    }

    async fn return_item(
        &self,
        rental_id: i32,
        rental_detail_id: i32,
        returned_on: NaiveDate,
    ) -> Result<Rental, DomainError> {
        let txn = self.db.begin().await?;

        let header = RentalHeaderEntity::find_by_id(rental_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DomainError::rental_not_found(rental_id))?;

        let detail = RentalDetailEntity::find_by_id(rental_detail_id)
            .filter(rental_detail::Column::RentalId.eq(header.id))
            .one(&txn)
            .await?
            .ok_or_else(|| DomainError::rental_detail_not_found(rental_detail_id))?;

        if let Some(returned) = detail.date_returned {
            return Err(DomainError::Conflict(format!(
                "Rental detail has already been returned on: {}",
                returned
            )));
        }

        let now = now();

        // OUT -> RETURNED only; a concurrent return loses here
        let marked = RentalDetailEntity::update_many()
            .col_expr(rental_detail::Column::DateReturned, Expr::value(returned_on))
            .col_expr(rental_detail::Column::UpdatedAt, Expr::value(now.clone()))
            .filter(rental_detail::Column::Id.eq(detail.id))
            .filter(rental_detail::Column::DateReturned.is_null())
            .exec(&txn)
            .await?;
        if marked.rows_affected != 1 {
            return Err(DomainError::Conflict(format!(
                "Rental detail {} has already been returned",
                detail.id
            )));
        }

        if !return_copy(&txn, detail.movie_id).await? {
            tracing::warn!(
                "Movie {} already has every copy available, counter left unchanged",
                detail.movie_id
            );
        }

        let mut header_active: rental_header::ActiveModel = header.into();
        header_active.updated_at = Set(now);
        let header = header_active.update(&txn).await?;

        let rental = load_rental(&txn, header).await?;
        txn.commit().await?;

        Ok(rental)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        CustomerRepository, GenreRepository, MovieRepository, NewCustomer, NewMovie,
    };
    use crate::infrastructure::db::init_db;
    use crate::infrastructure::{
        SeaOrmCustomerRepository, SeaOrmGenreRepository, SeaOrmMovieRepository,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct Fixture {
        db: DatabaseConnection,
        customer_id: i32,
        movies: SeaOrmMovieRepository,
        ledger: SeaOrmRentalRepository,
    }

    async fn fixture() -> Fixture {
        let db = init_db("sqlite::memory:").await.unwrap();
        let customer = SeaOrmCustomerRepository::new(db.clone())
            .create(NewCustomer {
                customer_name: "RENTER".to_string(),
                birthdate: date(1990, 5, 15),
                is_subscribed_to_newsletter: false,
            })
            .await
            .unwrap();
        Fixture {
            customer_id: customer.customer_id,
            movies: SeaOrmMovieRepository::new(db.clone()),
            ledger: SeaOrmRentalRepository::new(db.clone()),
            db,
        }
    }

    async fn movie(f: &Fixture, name: &str, copies: i32) -> i32 {
        let genre = SeaOrmGenreRepository::new(f.db.clone())
            .create(format!("{} genre", name))
            .await
            .unwrap();
        f.movies
            .create(NewMovie {
                movie_name: name.to_string(),
                genre_id: genre.genre_id,
                release_date: date(2000, 1, 1),
                date_added: date(2024, 1, 1),
                number_in_stock: copies,
                number_available: copies,
            })
            .await
            .unwrap()
            .movie_id
    }

    async fn available(f: &Fixture, movie_id: i32) -> i32 {
        f.movies
            .find_by_id(movie_id)
            .await
            .unwrap()
            .unwrap()
            .number_available
    }

    #[tokio::test]
    async fn stock_primitives_respect_bounds() {
        let f = fixture().await;
        let id = movie(&f, "solo", 1).await;

        assert!(!return_copy(&f.db, id).await.unwrap());
        assert!(take_copy(&f.db, id).await.unwrap());
        assert!(!take_copy(&f.db, id).await.unwrap());
        assert_eq!(available(&f, id).await, 0);
        assert!(return_copy(&f.db, id).await.unwrap());
        assert_eq!(available(&f, id).await, 1);
        assert!(!take_copy(&f.db, 9999).await.unwrap());
    }

    #[tokio::test]
    async fn checkout_takes_one_copy_per_item() {
        let f = fixture().await;
        let a = movie(&f, "alpha", 3).await;
        let b = movie(&f, "beta", 1).await;

        let rental = f
            .ledger
            .create(NewRental {
                customer_id: f.customer_id,
                movie_ids: vec![a, b, a],
                date_rented: date(2025, 3, 1),
            })
            .await
            .unwrap();

        assert_eq!(rental.rent_details.len(), 3);
        assert_eq!(rental.date_rented, date(2025, 3, 1));
        assert_eq!(rental.status, "PROCESSING");
        assert_eq!(available(&f, a).await, 1);
        assert_eq!(available(&f, b).await, 0);
    }

    #[tokio::test]
    async fn failed_checkout_rolls_back_earlier_items() {
        let f = fixture().await;
        let a = movie(&f, "alpha", 2).await;
        let b = movie(&f, "beta", 1).await;

        let err = f
            .ledger
            .create(NewRental {
                customer_id: f.customer_id,
                movie_ids: vec![a, b, b],
                date_rented: date(2025, 3, 1),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(available(&f, a).await, 2);
        assert_eq!(available(&f, b).await, 1);
        assert_eq!(RentalHeaderEntity::find().count(&f.db).await.unwrap(), 0);
        assert_eq!(RentalDetailEntity::find().count(&f.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn return_marks_item_once() {
        let f = fixture().await;
        let a = movie(&f, "alpha", 1).await;
        let rental = f
            .ledger
            .create(NewRental {
                customer_id: f.customer_id,
                movie_ids: vec![a],
                date_rented: date(2025, 3, 1),
            })
            .await
            .unwrap();
        let detail_id = rental.rent_details[0].rental_detail_id;

        let returned = f
            .ledger
            .return_item(rental.rental_id, detail_id, date(2025, 3, 4))
            .await
            .unwrap();
        assert_eq!(returned.rent_details[0].date_returned, Some(date(2025, 3, 4)));
        assert_eq!(returned.status, "COMPLETED");
        assert_eq!(available(&f, a).await, 1);

        let err = f
            .ledger
            .return_item(rental.rental_id, detail_id, date(2025, 3, 5))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Rental detail has already been returned on: 2025-03-04"
        );
        assert_eq!(available(&f, a).await, 1);
    }
}
