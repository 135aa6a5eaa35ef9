//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: item store selection and the data access layer
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and body decoding
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use todolist_infra::{AppConfig, ErrorCodePolicy, StoreError};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router around already-wired services.
pub fn build_app(services: AppServices, error_codes: ErrorCodePolicy) -> Router {
    let api = routes::router()
        .layer(Extension(Arc::new(services)))
        .layer(Extension(error_codes));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", api)
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::trace_requests)))
}

/// Public entrypoint used by `main.rs`: wire the configured store, then route.
pub async fn build_app_from_config(config: &AppConfig) -> Result<Router, StoreError> {
    let services = AppServices::from_config(config).await?;
    Ok(build_app(services, config.error_codes))
}
