//! HTTP routes

pub mod dashboard;
pub mod service_status;
pub mod session;
pub mod stripe_webhook;

use axum::http::{StatusCode, Uri};
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::rate_limit::rate_limit;
use crate::graphql;
use crate::state::AppState;

pub(crate) fn error_response(status: StatusCode, msg: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": msg })))
}

pub async fn hello() -> Json<Value> {
    Json(json!({ "message": "hello" }))
}

pub async fn not_found(uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("Not Found - {}", uri.path()) })),
    )
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    let production = state.config.is_production();

    let graphql_route = if production {
        post(graphql::graphql_handler)
    } else {
        post(graphql::graphql_handler).get(graphql::graphiql)
    };

    let session = Router::new()
        .route(
            "/api/session",
            get(session::get_session).delete(session::logout),
        )
        .route("/api/logout", post(session::logout))
        .route("/api/login", post(session::login))
        .route("/api/add-service-session", post(session::add_service))
        .route("/api/switch-service", post(session::switch_service))
        .route("/api/service-status", post(service_status::service_status));

    let mut shell = Router::new()
        .route("/admin", get(dashboard::shell))
        .route("/admin/{*rest}", get(dashboard::shell));
    for kind in ["hotel", "restaurant", "salon"] {
        shell = shell
            .route(&format!("/{kind}/dashboard"), get(dashboard::shell))
            .route(&format!("/{kind}/dashboard/{{*rest}}"), get(dashboard::shell));
    }

    let mut router = Router::new()
        .route("/hello", get(hello))
        .route(&state.config.graphql_path, graphql_route)
        .route("/stripe/webhook", post(stripe_webhook::handle_webhook))
        .merge(session)
        .merge(shell)
        .fallback(not_found);

    if production {
        router = router.layer(middleware::from_fn_with_state(state.clone(), rate_limit));
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
