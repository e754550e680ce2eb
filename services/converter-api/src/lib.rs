//! KML to CZML conversion service library.
//!
//! Exposes the overlay converter over HTTP: a multipart upload of one KML
//! document plus its images returns the CZML document as JSON.

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod state;

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Build the service routes.
///
/// Cross-cutting layers (tracing, compression, CORS) are added by the binary.
pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_upload_bytes();

    Router::new()
        .route(
            "/api/convertKml",
            post(handlers::convert::convert_kml_handler),
        )
        .route("/health", get(handlers::health::health_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(Extension(state))
}
