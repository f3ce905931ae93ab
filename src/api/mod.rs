pub mod customer;
pub mod error;
pub mod genre;
pub mod health;
pub mod movie;
pub mod pagination;
pub mod rental;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Customers
        .route(
            "/v1/customers",
            get(customer::list_customers).post(customer::create_customer),
        )
        .route(
            "/v1/customers/:id",
            get(customer::get_customer).patch(customer::update_customer),
        )
        // Rentals
        .route(
            "/v1/rentals",
            get(rental::list_rentals).post(rental::create_rental),
        )
        .route("/v1/rentals/:id", get(rental::get_rental))
        .route(
            "/v1/rentals/:rental_id/details/:rental_detail_id/return",
            patch(rental::return_rental),
        )
        // Catalog
        .route(
            "/v1/genres",
            get(genre::list_genres).post(genre::create_genre),
        )
        .route(
            "/v1/movies",
            get(movie::list_movies).post(movie::create_movie),
        )
        .route("/v1/movies/:id", get(movie::get_movie))
        .route("/v1/movies/:id/stock", patch(movie::update_stock))
        .with_state(state)
}
