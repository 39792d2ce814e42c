pub mod products;

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;

use crate::error::message_body;
use crate::AppState;

pub const WELCOME: &str =
    "Welcome to the Product API! Go to /api/products to see all products.";

pub async fn root() -> &'static str {
    WELCOME
}

pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let count = state.products.read().await.len();
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "product-directory", "products": count })),
    )
}

pub async fn not_found() -> axum::response::Response {
    message_body(StatusCode::NOT_FOUND, "Not Found")
}
