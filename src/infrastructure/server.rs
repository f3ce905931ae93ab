// Server module - Provides reusable HTTP server functionality

use axum::Router;
use axum::http::HeaderValue;
use sea_orm::DatabaseConnection;
use std::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api;
use crate::api_docs::ApiDoc;
use crate::infrastructure::AppState;

/// Build the full application: API under `/api`, Swagger UI, CORS and request tracing.
///
/// An empty origin list allows any origin.
pub fn build_router(db: DatabaseConnection, cors_allowed_origins: &[String]) -> Router {
    let state = AppState::new(db);
    let api_router = api::api_router(state);

    Router::new()
        .merge(SwaggerUi::new("/api/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_router)
        .layer(cors_layer(cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let mut parsed = Vec::new();
        for origin in origins {
            match origin.parse::<HeaderValue>() {
                Ok(v) => parsed.push(v),
                Err(e) => tracing::error!("Failed to parse CORS origin '{}': {}", origin, e),
            }
        }
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Find an available port starting from the preferred port
pub fn find_available_port(preferred_port: u16) -> Option<u16> {
    // Try preferred port first
    if TcpListener::bind(("0.0.0.0", preferred_port)).is_ok() {
        return Some(preferred_port);
    }

    // Scan next 100 ports
    ((preferred_port.saturating_add(1))..(preferred_port.saturating_add(100)))
        .find(|&port| TcpListener::bind(("0.0.0.0", port)).is_ok())
}
