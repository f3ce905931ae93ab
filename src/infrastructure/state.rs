//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{CustomerRepository, GenreRepository, MovieRepository, RentalRepository};
use crate::infrastructure::{
    SeaOrmCustomerRepository, SeaOrmGenreRepository, SeaOrmMovieRepository,
    SeaOrmRentalRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    pub customer_repo: Arc<dyn CustomerRepository>,
    pub genre_repo: Arc<dyn GenreRepository>,
    pub movie_repo: Arc<dyn MovieRepository>,
    /// Rental ledger
    pub rental_repo: Arc<dyn RentalRepository>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Self {
        let customer_repo = Arc::new(SeaOrmCustomerRepository::new(db.clone()));
        let genre_repo = Arc::new(SeaOrmGenreRepository::new(db.clone()));
        let movie_repo = Arc::new(SeaOrmMovieRepository::new(db.clone()));
        let rental_repo = Arc::new(SeaOrmRentalRepository::new(db.clone()));

        Self {
            db,
            customer_repo,
            genre_repo,
            movie_repo,
            rental_repo,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl axum::extract::FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
