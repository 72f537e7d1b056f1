use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{actions, relay},
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(relay::chat_page))
        .route("/webhook", post(actions::action_webhook))
        .route("/api/send_message", post(relay::send_message))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state))
}
