//! Rental Service - checkout and return workflow
//!
//! The ledger repository executes each workflow as one transaction; this
//! layer checks the request shape, picks the dates and logs.

use chrono::NaiveDate;

use super::today;
use crate::domain::{DomainError, NewRental, Page, PageRequest, Rental, RentalRepository};

#[derive(Debug, Clone)]
pub struct CreateRental {
    pub customer_id: i32,
    pub movie_ids: Vec<i32>,
    /// Defaults to today
    pub date_rented: Option<NaiveDate>,
}

pub async fn list_rentals(
    repo: &dyn RentalRepository,
    request: &PageRequest,
) -> Result<Page<Rental>, DomainError> {
    tracing::info!(
        "Fetching rentals - page: {}, size: {}",
        request.page,
        request.size
    );
    repo.find_page(request).await
}

pub async fn get_rental(repo: &dyn RentalRepository, id: i32) -> Result<Rental, DomainError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::rental_not_found(id))
}

pub async fn create_rental(
    repo: &dyn RentalRepository,
    input: CreateRental,
) -> Result<Rental, DomainError> {
    tracing::info!("Creating rental for customer: {}", input.customer_id);

    if input.movie_ids.is_empty() {
        return Err(DomainError::InvalidArgument(
            "At least one movie must be selected".to_string(),
        ));
    }

    let result = repo
        .create(NewRental {
            customer_id: input.customer_id,
            movie_ids: input.movie_ids,
            date_rented: input.date_rented.unwrap_or_else(today),
        })
        .await;

    match &result {
        Ok(rental) => tracing::info!(
            "Rental {} created with {} item(s)",
            rental.rental_id,
            rental.rent_details.len()
        ),
        Err(e) => tracing::warn!("Rental for customer {} rejected: {}", input.customer_id, e),
    }

    result
}

pub async fn return_rental(
    repo: &dyn RentalRepository,
    rental_id: i32,
    rental_detail_id: i32,
) -> Result<Rental, DomainError> {
    tracing::info!(
        "Returning item {} of rental {}",
        rental_detail_id,
        rental_id
    );
    repo.return_item(rental_id, rental_detail_id, today()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::domain::rules::STATUS_PROCESSING;

    /// Records what reaches the ledger
    #[derive(Default)]
    struct RecordingLedger {
        created: Mutex<Vec<NewRental>>,
        returned: Mutex<Vec<(i32, i32, NaiveDate)>>,
    }

    fn rental(id: i32, date_rented: NaiveDate) -> Rental {
        Rental {
            rental_id: id,
            customer_id: 1,
            customer_name: "JOHN DOE".to_string(),
            date_rented,
            created_date: "now".to_string(),
            modified_date: "now".to_string(),
            status: STATUS_PROCESSING.to_string(),
            rent_details: Vec::new(),
        }
    }

    #[async_trait]
    impl RentalRepository for RecordingLedger {
        async fn find_page(&self, request: &PageRequest) -> Result<Page<Rental>, DomainError> {
            Ok(Page::new(Vec::new(), request, 0))
        }

        async fn find_by_id(&self, _id: i32) -> Result<Option<Rental>, DomainError> {
            Ok(None)
        }

        async fn create(&self, input: NewRental) -> Result<Rental, DomainError> {
            let result = rental(1, input.date_rented);
            self.created.lock().unwrap().push(input);
            Ok(result)
        }

        async fn return_item(
            &self,
            rental_id: i32,
            rental_detail_id: i32,
            returned_on: NaiveDate,
        ) -> Result<Rental, DomainError> {
            self.returned
                .lock()
                .unwrap()
                .push((rental_id, rental_detail_id, returned_on));
            Ok(rental(rental_id, returned_on))
        }
    }

    #[tokio::test]
    async fn empty_movie_list_never_reaches_the_ledger() {
        let ledger = RecordingLedger::default();
        let err = create_rental(
            &ledger,
            CreateRental {
                customer_id: 1,
                movie_ids: vec![],
                date_rented: None,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, DomainError::InvalidArgument(_)));
        assert!(ledger.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn rental_date_defaults_to_today() {
        let ledger = RecordingLedger::default();
        create_rental(
            &ledger,
            CreateRental {
                customer_id: 1,
                movie_ids: vec![3, 3],
                date_rented: None,
            },
        )
        .await
        .unwrap();

        let created = ledger.created.lock().unwrap();
        assert_eq!(created[0].date_rented, today());
        assert_eq!(created[0].movie_ids, vec![3, 3]);
    }

    #[tokio::test]
    async fn supplied_rental_date_is_kept() {
        let ledger = RecordingLedger::default();
        let date = NaiveDate::from_ymd_opt(2024, 12, 24).unwrap();
        let rental = create_rental(
            &ledger,
            CreateRental {
                customer_id: 1,
                movie_ids: vec![1],
                date_rented: Some(date),
            },
        )
        .await
        .unwrap();

        assert_eq!(rental.date_rented, date);
    }

    #[tokio::test]
    async fn returns_are_dated_today() {
        let ledger = RecordingLedger::default();
        return_rental(&ledger, 4, 9).await.unwrap();

        assert_eq!(*ledger.returned.lock().unwrap(), vec![(4, 9, today())]);
    }

    #[tokio::test]
    async fn missing_rental_is_not_found() {
        let ledger = RecordingLedger::default();
        let err = get_rental(&ledger, 77).await.unwrap_err();
        assert_eq!(err.to_string(), "Rental not found with id: 77");
    }
}
