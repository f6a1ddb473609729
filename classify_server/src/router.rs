use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use tower_http::cors::CorsLayer;

use crate::{
    endpoints::{healthcheck, home, predict},
    AppState,
};

/// Build the HTTP app: liveness, health check and prediction, open to any origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/healthcheck", get(healthcheck))
        .route("/predict", post(predict))
        .layer(DefaultBodyLimit::disable())
        .layer(CorsLayer::permissive())
        .layer(Extension(state))
}
