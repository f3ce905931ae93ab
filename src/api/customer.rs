//! Customer API handlers

use axum::{
    Json,
    extract::{OriginalUri, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use validator::Validate;

use super::error::{ApiError, ApiPath, ApiQuery, AtPath, ValidatedJson, required};
use super::pagination::PageQuery;
use crate::domain::CustomerPatch;
use crate::infrastructure::AppState;
use crate::services::customer_service::{self, CreateCustomer};

static UPPERCASE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z\s]+$").expect("customer name pattern compiles"));

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    #[validate(
        required(message = "Customer name is required"),
        length(min = 1, max = 100, message = "Customer name must be 1 to 100 characters")
    )]
    pub customer_name: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub is_subscribed_to_newsletter: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    #[validate(regex(
        path = *UPPERCASE_NAME,
        message = "Customer name must be uppercase letters only"
    ))]
    pub customer_name: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub is_subscribed_to_newsletter: Option<bool>,
}

#[utoipa::path(
    get,
    path = "/api/v1/customers",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of customers, default sort customerName ascending"),
        (status = 400, description = "Unsupported sort property")
    ),
    tag = "customers"
)]
pub async fn list_customers(
    State(state): State<AppState>,
    uri: OriginalUri,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let request = query.into_request("customerName").at(&uri)?;
    let page = customer_service::list_customers(state.customer_repo.as_ref(), &request)
        .await
        .at(&uri)?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer found"),
        (status = 404, description = "Customer not found")
    ),
    tag = "customers"
)]
pub async fn get_customer(
    State(state): State<AppState>,
    uri: OriginalUri,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = customer_service::get_customer(state.customer_repo.as_ref(), id)
        .await
        .at(&uri)?;
    Ok(Json(customer))
}

#[utoipa::path(
    post,
    path = "/api/v1/customers",
    responses(
        (status = 201, description = "Customer created, Location header points at it"),
        (status = 400, description = "Missing name or birthdate, or customer under 13")
    ),
    tag = "customers"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    uri: OriginalUri,
    ValidatedJson(payload): ValidatedJson<CreateCustomerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreateCustomer {
        customer_name: required(
            payload.customer_name,
            "customerName",
            "Customer name is required",
        )
        .at(&uri)?,
        birthdate: payload.birthdate,
        is_subscribed_to_newsletter: payload.is_subscribed_to_newsletter,
    };

    let customer = customer_service::create_customer(state.customer_repo.as_ref(), input)
        .await
        .at(&uri)?;

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), customer.customer_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(customer),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/v1/customers/{id}",
    params(("id" = i32, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer after applying the changed fields"),
        (status = 400, description = "No fields supplied or invalid values"),
        (status = 404, description = "Customer not found")
    ),
    tag = "customers"
)]
pub async fn update_customer(
    State(state): State<AppState>,
    uri: OriginalUri,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCustomerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let patch = CustomerPatch {
        customer_name: payload.customer_name,
        birthdate: payload.birthdate,
        is_subscribed_to_newsletter: payload.is_subscribed_to_newsletter,
    };

    let customer = customer_service::update_customer(state.customer_repo.as_ref(), id, patch)
        .await
        .at(&uri)?;
    Ok(Json(customer))
}
