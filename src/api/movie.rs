//! Movie API handlers

use axum::{
    Json,
    extract::{OriginalUri, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use super::error::{ApiError, ApiPath, ApiQuery, AtPath, ValidatedJson, required};
use super::pagination::PageQuery;
use crate::infrastructure::AppState;
use crate::services::catalog_service::{self, CreateMovie, StockPatch};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieRequest {
    #[validate(
        required(message = "Movie name is required"),
        length(min = 1, max = 100, message = "Movie name must be 1 to 100 characters")
    )]
    pub movie_name: Option<String>,
    #[validate(required(message = "Genre ID is required"))]
    pub genre_id: Option<i32>,
    #[validate(required(message = "Release date is required"))]
    pub release_date: Option<NaiveDate>,
    pub date_added: Option<NaiveDate>,
    #[serde(default)]
    pub number_in_stock: i32,
    pub number_available: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockRequest {
    pub number_in_stock: Option<i32>,
    pub number_available: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/api/v1/movies",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of movies, default sort movieName ascending"),
        (status = 400, description = "Unsupported sort property")
    ),
    tag = "catalog"
)]
pub async fn list_movies(
    State(state): State<AppState>,
    uri: OriginalUri,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let request = query.into_request("movieName").at(&uri)?;
    let page = catalog_service::list_movies(state.movie_repo.as_ref(), &request)
        .await
        .at(&uri)?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/movies/{id}",
    params(("id" = i32, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Movie with its stock counters"),
        (status = 404, description = "Movie not found")
    ),
    tag = "catalog"
)]
pub async fn get_movie(
    State(state): State<AppState>,
    uri: OriginalUri,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let movie = catalog_service::get_movie(state.movie_repo.as_ref(), id)
        .await
        .at(&uri)?;
    Ok(Json(movie))
}

#[utoipa::path(
    post,
    path = "/api/v1/movies",
    responses(
        (status = 201, description = "Movie added, stock counters clamped to 0..=20"),
        (status = 400, description = "Missing or invalid fields"),
        (status = 404, description = "Genre not found")
    ),
    tag = "catalog"
)]
pub async fn create_movie(
    State(state): State<AppState>,
    uri: OriginalUri,
    ValidatedJson(payload): ValidatedJson<CreateMovieRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreateMovie {
        movie_name: required(payload.movie_name, "movieName", "Movie name is required")
            .at(&uri)?,
        genre_id: required(payload.genre_id, "genreId", "Genre ID is required").at(&uri)?,
        release_date: required(
            payload.release_date,
            "releaseDate",
            "Release date is required",
        )
        .at(&uri)?,
        date_added: payload.date_added,
        number_in_stock: payload.number_in_stock,
        number_available: payload.number_available,
    };

    let movie = catalog_service::create_movie(state.movie_repo.as_ref(), input)
        .await
        .at(&uri)?;

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), movie.movie_id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(movie)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/movies/{id}/stock",
    params(("id" = i32, Path, description = "Movie id")),
    responses(
        (status = 200, description = "Movie with updated counters"),
        (status = 400, description = "No counters supplied"),
        (status = 404, description = "Movie not found")
    ),
    tag = "catalog"
)]
pub async fn update_stock(
    State(state): State<AppState>,
    uri: OriginalUri,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateStockRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let patch = StockPatch {
        number_in_stock: payload.number_in_stock,
        number_available: payload.number_available,
    };
    let movie = catalog_service::update_stock(state.movie_repo.as_ref(), id, patch)
        .await
        .at(&uri)?;
    Ok(Json(movie))
}
