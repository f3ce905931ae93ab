//! Translation of domain errors into HTTP responses
//!
//! Body shape: `{status, error, message, path, timestamp, validationErrors?}`.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, OriginalUri, Path, Query, Request,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::domain::DomainError;

#[derive(Debug)]
pub struct ApiError {
    pub error: DomainError,
    pub path: String,
}

impl ApiError {
    pub fn new(error: DomainError, path: &str) -> Self {
        Self {
            error,
            path: path.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match &self.error {
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::BusinessRule(_)
            | DomainError::InvalidArgument(_)
            | DomainError::FieldValidation(_) => StatusCode::BAD_REQUEST,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    status: u16,
    error: &'static str,
    message: String,
    path: String,
    timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    validation_errors: Option<BTreeMap<String, String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (message, validation_errors) = match self.error {
            DomainError::FieldValidation(fields) => {
                ("Validation failed".to_string(), Some(fields))
            }
            DomainError::Database(detail) => {
                tracing::error!("Database error on {}: {}", self.path, detail);
                ("An unexpected error occurred".to_string(), None)
            }
            other => {
                tracing::warn!("{} on {}: {}", status, self.path, other);
                (other.to_string(), None)
            }
        };

        let body = ErrorBody {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error"),
            message,
            path: self.path,
            timestamp: chrono::Utc::now().to_rfc3339(),
            validation_errors,
        };

        (status, Json(body)).into_response()
    }
}

/// Attach the request path to a domain result
pub trait AtPath<T> {
    fn at(self, uri: &OriginalUri) -> Result<T, ApiError>;
}

impl<T> AtPath<T> for Result<T, DomainError> {
    fn at(self, uri: &OriginalUri) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::new(e, uri.path()))
    }
}

/// `customer_name` -> `customerName`, matching the JSON field names
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

pub fn field_errors(errors: &ValidationErrors) -> DomainError {
    let fields = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let field = camel_case(&field);
            let message = errs
                .first()
                .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("Invalid value for {}", field));
            (field, message)
        })
        .collect();
    DomainError::FieldValidation(fields)
}

/// Report a single missing field the same way the schema validation does
pub fn required<T>(value: Option<T>, field: &str, message: &str) -> Result<T, DomainError> {
    value.ok_or_else(|| {
        DomainError::FieldValidation(BTreeMap::from([(field.to_string(), message.to_string())]))
    })
}

/// JSON body that has been deserialized and passed its field constraints
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let path = req
            .extensions()
            .get::<OriginalUri>()
            .map(|uri| uri.path().to_string())
            .unwrap_or_else(|| req.uri().path().to_string());

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                ApiError::new(DomainError::InvalidArgument(rejection.body_text()), &path)
            })?;

        value
            .validate()
            .map_err(|errors| ApiError::new(field_errors(&errors), &path))?;

        Ok(Self(value))
    }
}

fn request_path(parts: &Parts) -> String {
    parts
        .extensions
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| parts.uri.path().to_string())
}

/// Path parameters; parse failures use the JSON error body
#[derive(Debug)]
pub struct ApiPath<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = request_path(parts);
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| {
                ApiError::new(DomainError::InvalidArgument(rejection.body_text()), &path)
            })?;
        Ok(Self(value))
    }
}

/// Query string; parse failures use the JSON error body
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path = request_path(parts);
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: QueryRejection| {
                ApiError::new(DomainError::InvalidArgument(rejection.body_text()), &path)
            })?;
        Ok(Self(value))
    }
}
