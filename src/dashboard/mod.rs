use axum::{extract::State, response::Html, routing::get, Json, Router};
use serde::Serialize;
use tokio::sync::watch;

use crate::render::render_page;
use crate::view::ViewState;

#[derive(Clone)]
pub struct AppState {
    pub view: watch::Receiver<ViewState>,
}

/// Build the Axum router serving the players view.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/state", get(state_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// GET / — the view rendered as a full page.
async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let page = render_page(&state.view.borrow());
    Html(page)
}

/// GET /api/state
async fn state_handler(State(state): State<AppState>) -> Json<ViewState> {
    let current = state.view.borrow().clone();
    Json(current)
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    state: &'static str,
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<Health> {
    let label = state.view.borrow().label();
    Json(Health {
        status: "ok",
        state: label,
    })
}
