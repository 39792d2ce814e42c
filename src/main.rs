use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put, MethodRouter},
    Router,
};
use tokio::sync::RwLock;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;

mod config;
mod error;
mod handlers;
mod middleware;
mod models;
mod seed;
mod store;

use crate::config::Config;
use crate::store::ProductStore;

/// Shared application state, cheap to clone (all heap behind Arc).
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<RwLock<ProductStore>>,
    pub config: Arc<Config>,
}

impl AppState {
    /// State over the seeded collection.
    pub fn new(config: Config) -> Self {
        Self::with_store(config, ProductStore::seeded())
    }

    pub fn with_store(config: Config, store: ProductStore) -> Self {
        Self {
            products: Arc::new(RwLock::new(store)),
            config: Arc::new(config),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,product_directory=debug")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;
    let addr = config.addr();
    if config.require_auth {
        info!("Bearer token required for POST/PUT/DELETE");
    }

    let state = AppState::new(config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server is running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

fn build_router(state: AppState) -> Router {
    let guard_state = state.clone();
    let guard = move |route: MethodRouter<AppState>| -> MethodRouter<AppState> {
        if guard_state.config.require_auth {
            route.route_layer(axum::middleware::from_fn_with_state(
                guard_state.clone(),
                middleware::require_bearer,
            ))
        } else {
            route
        }
    };

    Router::new()
        // ── Root / Health ───────────────────────────────────────────────────
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))

        // ── Products CRUD ───────────────────────────────────────────────────
        .route(
            "/api/products",
            get(handlers::products::list_products)
                .merge(guard(post(handlers::products::create_product))),
        )
        .route(
            "/api/products/:id",
            get(handlers::products::get_product)
                .merge(guard(put(handlers::products::update_product)))
                .merge(guard(delete(handlers::products::delete_product))),
        )
        .fallback(handlers::not_found)

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(middleware::panic_response))
        .with_state(state)
}
