pub mod error;
pub mod handlers;
pub mod state;
pub mod types;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::config::{ServeConfig, Storage};
use crate::jupiter::JupiterClient;
use crate::store::{MemoryStore, SqliteStore, WorkflowStore};

use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(|| async { "ok" }))
        // Saved workflows
        .route(
            "/api/workflows",
            get(handlers::workflows::list).post(handlers::workflows::create),
        )
        .route(
            "/api/workflows/{id}",
            get(handlers::workflows::get_one)
                .put(handlers::workflows::update)
                .delete(handlers::workflows::delete),
        )
        // Validate + preview
        .route("/api/validate", post(handlers::validate::validate_workflow))
        .route("/api/preview", post(handlers::preview::preview))
        // Node library + schema
        .route("/api/templates", get(handlers::templates::list))
        .route("/api/schema", get(handlers::templates::get_schema))
        // Simulated market
        .route("/api/quote", post(handlers::quote::quote))
        .route("/api/simulate", post(handlers::simulate::simulate))
        // Jupiter proxy
        .route("/api/jupiter/quote", get(handlers::jupiter::quote))
        .route("/api/jupiter/swap", post(handlers::jupiter::swap))
        .route("/api/jupiter/tokens", get(handlers::jupiter::tokens))
        // Wallet
        .route("/api/wallet", get(handlers::wallet::get))
        .route("/api/wallet/validate", post(handlers::wallet::validate))
        .route("/api/wallet/connect", post(handlers::wallet::connect))
        .route("/api/wallet/disconnect", post(handlers::wallet::disconnect))
        .layer(cors)
        .with_state(state)
}

fn open_store(storage: &Storage) -> Result<Arc<dyn WorkflowStore>> {
    Ok(match storage {
        Storage::Memory => Arc::new(MemoryStore::new()),
        Storage::Sqlite(path) => {
            let store =
                SqliteStore::open(path).with_context(|| format!("opening database at {}", path.display()))?;
            Arc::new(store)
        }
    })
}

pub async fn serve(config: ServeConfig) -> Result<()> {
    let store = open_store(&config.storage)?;
    let state = AppState::new(store, JupiterClient::new(config.jupiter_url.as_str()));
    let app = router(state);

    let addr = config.addr();
    println!("defi-canvas API server listening on {addr}");
    match &config.storage {
        Storage::Sqlite(path) => println!("  Storage:  {}", path.display()),
        Storage::Memory => println!("  Storage:  in-memory (workflows are lost on exit)"),
    }
    println!("  Jupiter:  {}", config.jupiter_url);
    println!("  Health:   GET  http://{addr}/health");
    println!("  Library:  GET  http://{addr}/api/templates");
    println!("  Validate: POST http://{addr}/api/validate");
    println!("  Preview:  POST http://{addr}/api/preview");
    println!("  Simulate: POST http://{addr}/api/simulate");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding to {addr}"))?;

    tracing::info!(%addr, "server started");
    axum::serve(listener, app).await.context("running server")?;

    Ok(())
}
