//! Route modules for the DICOM relay server

pub mod dicom;
pub mod form;
pub mod health;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let assets = ServeDir::new(&state.config().server.form_assets_dir);

    Router::new()
        .merge(form::router())
        .nest("/health", health::router())
        .nest("/api/dicom", dicom::router())
        .nest_service("/pkg", assets)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
