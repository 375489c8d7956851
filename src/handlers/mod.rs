pub mod rest;

use axum::{
    Router,
    http::{HeaderValue, Method, header, header::InvalidHeaderValue},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use std::{sync::Arc, time::Instant};

use crate::service::ContactService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ContactService>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(service: Arc<ContactService>) -> Self {
        Self {
            service,
            started_at: Instant::now(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(rest::root))
        .route("/health", get(rest::health))
        .route("/api/contact", post(rest::submit_contact))
        .route("/api-doc/openapi.json", get(rest::openapi))
        .fallback(rest::not_found)
        .method_not_allowed_fallback(rest::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Only `origin` may call the API from a browser, with credentials.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    Ok(CorsLayer::new()
        .allow_origin(origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}
