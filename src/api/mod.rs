pub mod config;
pub mod error;
pub mod response;
pub mod extractors;
pub mod handlers;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::utils::app_config::AppConfig;
use config::ApiConfig;
use handlers::{finance::*, health};

pub fn app_router(app_config: AppConfig, api_config: &ApiConfig) -> Router {
    let router = Router::new()
        .route("/api/health", get(health::health))
        .route("/api/data", get(get_data).post(save_data))
        .route("/api/reset", post(reset_data));

    // Front-end assets are served from disk when a directory is configured.
    let router = match &api_config.static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_config)
}
