use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

use crate::{
    error::{AppError, AppResult},
    models::{CreateProduct, Product, ProductId, UpdateProduct},
    AppState,
};

/// Path ids that do not parse as a number can never match a record.
fn parse_id(raw: &str) -> AppResult<ProductId> {
    raw.parse().map_err(|_| {
        debug!(id = raw, "Non-numeric product id");
        AppError::product_not_found()
    })
}

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    let products = state.products.read().await.list();
    info!(count = products.len(), "Listed products");
    Json(products)
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let id = parse_id(&id)?;
    let product = state
        .products
        .read()
        .await
        .get(id)
        .cloned()
        .ok_or_else(AppError::product_not_found)?;

    info!(id = %id, "Fetched product");
    Ok(Json(product))
}

// ── Create ────────────────────────────────────────────────────────────────────

pub async fn create_product(
    State(state): State<AppState>,
    payload: Option<Json<CreateProduct>>,
) -> AppResult<(StatusCode, Json<Product>)> {
    // A missing or unreadable body creates a record with only an id
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let product = state
        .products
        .write()
        .await
        .create(payload)
        .ok_or_else(|| anyhow::anyhow!("product id space exhausted"))?;

    info!(id = %product.id, name = ?product.name, "Created product");
    Ok((StatusCode::CREATED, Json(product)))
}

// ── Update ────────────────────────────────────────────────────────────────────

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<Json<UpdateProduct>>,
) -> AppResult<Json<Product>> {
    let id = parse_id(&id)?;
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let product = state
        .products
        .write()
        .await
        .update(id, payload)
        .ok_or_else(AppError::product_not_found)?;

    info!(id = %id, "Updated product");
    Ok(Json(product))
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let id = parse_id(&id)?;
    let product = state
        .products
        .write()
        .await
        .delete(id)
        .ok_or_else(AppError::product_not_found)?;

    info!(id = %id, "Deleted product");
    Ok(Json(product))
}
