//! Catalog Service - genres and movies

use chrono::NaiveDate;

use super::today;
use crate::domain::{
    DomainError, Genre, GenreRepository, Movie, MovieRepository, NewMovie, Page, PageRequest,
};

/// Input for adding a movie to the catalog
#[derive(Debug, Clone)]
pub struct CreateMovie {
    pub movie_name: String,
    pub genre_id: i32,
    pub release_date: NaiveDate,
    pub date_added: Option<NaiveDate>,
    pub number_in_stock: i32,
    /// Defaults to every copy being on the shelf
    pub number_available: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct StockPatch {
    pub number_in_stock: Option<i32>,
    pub number_available: Option<i32>,
}

pub async fn list_genres(repo: &dyn GenreRepository) -> Result<Vec<Genre>, DomainError> {
    repo.find_all().await
}

pub async fn create_genre(repo: &dyn GenreRepository, name: String) -> Result<Genre, DomainError> {
    tracing::info!("Creating genre: {}", name);
    repo.create(name).await
}

pub async fn list_movies(
    repo: &dyn MovieRepository,
    request: &PageRequest,
) -> Result<Page<Movie>, DomainError> {
    tracing::info!(
        "Fetching movies - page: {}, size: {}",
        request.page,
        request.size
    );
    repo.find_page(request).await
}

pub async fn get_movie(repo: &dyn MovieRepository, id: i32) -> Result<Movie, DomainError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::movie_not_found(id))
}

pub async fn create_movie(
    repo: &dyn MovieRepository,
    input: CreateMovie,
) -> Result<Movie, DomainError> {
    tracing::info!("Adding movie '{}' to the catalog", input.movie_name);

    repo.create(NewMovie {
        movie_name: input.movie_name,
        genre_id: input.genre_id,
        release_date: input.release_date,
        date_added: input.date_added.unwrap_or_else(today),
        number_in_stock: input.number_in_stock,
        number_available: input.number_available.unwrap_or(input.number_in_stock),
    })
    .await
}

/// Change stock counters; out-of-range values are clamped by the store.
pub async fn update_stock(
    repo: &dyn MovieRepository,
    id: i32,
    patch: StockPatch,
) -> Result<Movie, DomainError> {
    if patch.number_in_stock.is_none() && patch.number_available.is_none() {
        return Err(DomainError::InvalidArgument(
            "No fields provided for update".to_string(),
        ));
    }

    let existing = get_movie(repo, id).await?;
    let number_in_stock = patch.number_in_stock.unwrap_or(existing.number_in_stock);
    let number_available = patch.number_available.unwrap_or(existing.number_available);

    tracing::info!(
        "Updating stock for movie {}: in stock {} -> {}, available {} -> {}",
        id,
        existing.number_in_stock,
        number_in_stock,
        existing.number_available,
        number_available
    );

    repo.update_stock(id, number_in_stock, number_available).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Holds one movie and remembers the counters it was asked to store
    struct OneMovie {
        movie: Movie,
        stored: Mutex<Option<(i32, i32)>>,
    }

    impl OneMovie {
        fn new(number_in_stock: i32, number_available: i32) -> Self {
            let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            Self {
                movie: Movie {
                    movie_id: 1,
                    movie_name: "HEAT".to_string(),
                    genre_id: 1,
                    genre: "CRIME".to_string(),
                    release_date: day,
                    date_added: day,
                    number_in_stock,
                    number_available,
                    created_date: String::new(),
                    modified_date: String::new(),
                },
                stored: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl MovieRepository for OneMovie {
        async fn find_page(&self, _request: &PageRequest) -> Result<Page<Movie>, DomainError> {
            unimplemented!()
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Movie>, DomainError> {
            Ok((id == self.movie.movie_id).then(|| self.movie.clone()))
        }

        async fn create(&self, _input: NewMovie) -> Result<Movie, DomainError> {
            unimplemented!()
        }

        async fn update_stock(
            &self,
            _id: i32,
            number_in_stock: i32,
            number_available: i32,
        ) -> Result<Movie, DomainError> {
            *self.stored.lock().unwrap() = Some((number_in_stock, number_available));
            let mut movie = self.movie.clone();
            movie.number_in_stock = number_in_stock;
            movie.number_available = number_available;
            Ok(movie)
        }
    }

    #[tokio::test]
    async fn stock_patch_keeps_missing_counter() {
        let repo = OneMovie::new(5, 2);
        let patch = StockPatch {
            number_in_stock: Some(8),
            number_available: None,
        };

        update_stock(&repo, 1, patch).await.unwrap();
        assert_eq!(*repo.stored.lock().unwrap(), Some((8, 2)));
    }

    #[tokio::test]
    async fn empty_stock_patch_is_rejected() {
        let repo = OneMovie::new(5, 2);
        let err = update_stock(&repo, 1, StockPatch::default()).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
        assert!(repo.stored.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_movie_is_not_found() {
        let repo = OneMovie::new(5, 2);
        let patch = StockPatch {
            number_available: Some(1),
            ..Default::default()
        };
        let err = update_stock(&repo, 9, patch).await.unwrap_err();
        assert_eq!(err.to_string(), "Movie not found with ID: 9");
    }
}
