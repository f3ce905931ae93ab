use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::customer::list_customers,
        api::customer::get_customer,
        api::customer::create_customer,
        api::customer::update_customer,
        api::rental::list_rentals,
        api::rental::get_rental,
        api::rental::create_rental,
        api::rental::return_rental,
        api::genre::list_genres,
        api::genre::create_genre,
        api::movie::list_movies,
        api::movie::get_movie,
        api::movie::create_movie,
        api::movie::update_stock,
    ),
    tags(
        (name = "customers", description = "Customer registry"),
        (name = "rentals", description = "Checkouts and returns"),
        (name = "catalog", description = "Genres, movies and stock")
    )
)]
pub struct ApiDoc;
