//! dermascan-lambda
//!
//! HTTP API over the scan-session workflow, served through `lambda_http`.
//! The router is exposed here so it can be driven in-process by tests.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/questionnaire", get(routes::questionnaire::list_questions))
        .route("/sessions", post(routes::sessions::create_session))
        .route(
            "/sessions/{id}",
            get(routes::sessions::get_session).delete(routes::sessions::delete_session),
        )
        .route(
            "/sessions/{id}/scan",
            post(routes::sessions::begin_scan).delete(routes::sessions::clear_scan),
        )
        .route(
            "/sessions/{id}/classification",
            post(routes::sessions::accept_classification),
        )
        .route(
            "/sessions/{id}/questionnaire",
            post(routes::sessions::build_submission),
        )
        .route("/sessions/{id}/report", post(routes::sessions::accept_report))
        .route("/sessions/{id}/save", post(routes::scans::save_session))
        .route("/scans", get(routes::scans::list_scans))
        .route(
            "/scans/{id}",
            get(routes::scans::get_scan).delete(routes::scans::delete_scan),
        )
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
