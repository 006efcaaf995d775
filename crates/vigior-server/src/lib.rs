//! vigior-server
//!
//! HTTP JSON API over the VIGIOR engine and record store.

use axum::middleware as axum_mw;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

/// Build the router with every route and layer attached.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/models", get(routes::models::list_models))
        .route("/evaluate", post(routes::evaluate::evaluate))
        .route("/records", get(routes::records::list_records))
        .route("/records", post(routes::records::create_record))
        .route("/records/{id}", get(routes::records::get_record))
        .route("/records/{id}/notes", put(routes::records::update_notes))
        .route("/records/{id}/report", get(routes::records::case_report))
        .route("/cohort/summary", get(routes::cohort::cohort_summary))
        .route("/cohort/report", get(routes::cohort::cohort_report))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
