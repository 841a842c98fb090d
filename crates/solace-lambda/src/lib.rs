//! solace-lambda
//!
//! HTTP API over the session, question and journal services. Runs on AWS
//! Lambda behind API Gateway, or as a plain listener for local use.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// The full application router with middleware and state applied.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/instruments", get(routes::instruments::list_instruments))
        .route(
            "/instruments/{id}",
            get(routes::instruments::get_instrument_detail),
        );

    let protected = Router::new()
        .route("/sessions", get(routes::sessions::list_sessions))
        .route("/sessions", post(routes::sessions::create_session))
        .route("/sessions/{id}", get(routes::sessions::get_session))
        .route("/sessions/{id}", delete(routes::sessions::delete_session))
        .route("/sessions/{id}/name", put(routes::sessions::rename_session))
        .route(
            "/sessions/{id}/scores",
            post(routes::sessions::update_question_scores),
        )
        .route(
            "/sessions/{id}/questions",
            get(routes::sessions::get_questions),
        )
        .route("/sessions/{id}/end", post(routes::sessions::end_session))
        .route(
            "/sessions/{id}/resume",
            post(routes::sessions::resume_session),
        )
        .route(
            "/sessions/{id}/messages",
            get(routes::messages::list_messages),
        )
        .route(
            "/sessions/{id}/messages",
            post(routes::messages::record_exchange),
        )
        .route("/journal", get(routes::journal::list_entries))
        .route("/journal", post(routes::journal::create_entry))
        .route("/journal/{id}", put(routes::journal::update_entry))
        .route("/journal/{id}", delete(routes::journal::delete_entry))
        .route("/dashboard", get(routes::dashboard::get_dashboard))
        .route_layer(axum_mw::from_fn_with_state(
            state.auth,
            middleware::auth::require_auth,
        ));

    public
        .merge(protected)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
