pub mod employees;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use staffdir_core::Envelope;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // API info
        .route("/", get(index))
        // Employee CRUD
        .merge(employees::routes())
        // Health check
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Json<Envelope<Value>> {
    let info = json!({ "version": env!("CARGO_PKG_VERSION") });
    let envelope = Envelope::data(info).with_message("Employee Directory API is running");
    Json(envelope)
}

async fn health() -> &'static str {
    "OK"
}
