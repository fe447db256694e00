//! Axum router wiring.
//!
//! `/` serves a fixed page, the optional metrics path serves Prometheus text,
//! and every other path falls through to the counting handler.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{any, get},
    Router,
};

use crate::{app_state::AppState, hits};

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new().route("/", any(hits::index));

    if let Some(path) = state.cfg().gateway.metrics_path.as_deref() {
        router = router.route(path, get(metrics));
    }

    router.fallback(hits::handle).with_state(state)
}

async fn metrics(State(app): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        app.metrics().render(),
    )
}
