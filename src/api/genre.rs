//! Genre API handlers

use axum::{
    Json,
    extract::{OriginalUri, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use super::error::{ApiError, AtPath, ValidatedJson, required};
use crate::infrastructure::AppState;
use crate::services::catalog_service;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGenreRequest {
    #[validate(
        required(message = "Genre name is required"),
        length(min = 1, max = 50, message = "Genre name must be 1 to 50 characters")
    )]
    pub genre_name: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/genres",
    responses((status = 200, description = "All genres ordered by name")),
    tag = "catalog"
)]
pub async fn list_genres(
    State(state): State<AppState>,
    uri: OriginalUri,
) -> Result<impl IntoResponse, ApiError> {
    let genres = catalog_service::list_genres(state.genre_repo.as_ref())
        .await
        .at(&uri)?;
    Ok(Json(genres))
}

#[utoipa::path(
    post,
    path = "/api/v1/genres",
    responses(
        (status = 201, description = "Genre created"),
        (status = 400, description = "Missing name or genre already exists")
    ),
    tag = "catalog"
)]
pub async fn create_genre(
    State(state): State<AppState>,
    uri: OriginalUri,
    ValidatedJson(payload): ValidatedJson<CreateGenreRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = required(payload.genre_name, "genreName", "Genre name is required").at(&uri)?;
    let genre = catalog_service::create_genre(state.genre_repo.as_ref(), name)
        .await
        .at(&uri)?;
    Ok((StatusCode::CREATED, Json(genre)))
}
