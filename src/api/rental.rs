//! Rental API handlers

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
use crate::services::rental_service::{self, CreateRental};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalRequest {
    #[validate(required(message = "Customer ID is required"))]
    pub customer_id: Option<i32>,
    #[validate(
        required(message = "At least one movie must be selected"),
        length(min = 1, message = "At least one movie must be selected")
    )]
    pub movie_ids: Option<Vec<i32>>,
    pub date_rented: Option<NaiveDate>,
}

#[utoipa::path(
    get,
    path = "/api/v1/rentals",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of rentals, default sort dateRented ascending"),
        (status = 400, description = "Unsupported sort property")
    ),
    tag = "rentals"
)]
pub async fn list_rentals(
    State(state): State<AppState>,
    uri: OriginalUri,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let request = query.into_request("dateRented").at(&uri)?;
    let page = rental_service::list_rentals(state.rental_repo.as_ref(), &request)
        .await
        .at(&uri)?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/rentals/{id}",
    params(("id" = i32, Path, description = "Rental id")),
    responses(
        (status = 200, description = "Rental with its items"),
        (status = 404, description = "Rental not found")
    ),
    tag = "rentals"
)]
pub async fn get_rental(
    State(state): State<AppState>,
    uri: OriginalUri,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let rental = rental_service::get_rental(state.rental_repo.as_ref(), id)
        .await
        .at(&uri)?;
    Ok(Json(rental))
}

#[utoipa::path(
    post,
    path = "/api/v1/rentals",
    responses(
        (status = 201, description = "Rental created, one copy taken per movie id"),
        (status = 400, description = "Missing customer or movie ids"),
        (status = 404, description = "Customer or movie not found"),
        (status = 409, description = "A requested movie is out of stock")
    ),
    tag = "rentals"
)]
pub async fn create_rental(
    State(state): State<AppState>,
    uri: OriginalUri,
    ValidatedJson(payload): ValidatedJson<CreateRentalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreateRental {
        customer_id: required(payload.customer_id, "customerId", "Customer ID is required")
            .at(&uri)?,
        movie_ids: required(
            payload.movie_ids,
            "movieIds",
            "At least one movie must be selected",
        )
        .at(&uri)?,
        date_rented: payload.date_rented,
    };

    let rental = rental_service::create_rental(state.rental_repo.as_ref(), input)
        .await
        .at(&uri)?;

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), rental.rental_id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(rental)))
}

#[utoipa::path(
    patch,
    path = "/api/v1/rentals/{rental_id}/details/{rental_detail_id}/return",
    params(
        ("rental_id" = i32, Path, description = "Rental id"),
        ("rental_detail_id" = i32, Path, description = "Rental item id")
    ),
    responses(
        (status = 200, description = "Rental after the item was returned"),
        (status = 404, description = "Rental or item not found"),
        (status = 409, description = "Item already returned")
    ),
    tag = "rentals"
)]
pub async fn return_rental(
    State(state): State<AppState>,
    uri: OriginalUri,
    ApiPath((rental_id, rental_detail_id)): ApiPath<(i32, i32)>,
) -> Result<impl IntoResponse, ApiError> {
    let rental =
        rental_service::return_rental(state.rental_repo.as_ref(), rental_id, rental_detail_id)
            .await
            .at(&uri)?;
    Ok(Json(rental))
}
