pub mod error;
pub mod handlers;
mod routes;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use sqlx::{Pool, Sqlite};
use tracing::info;

use crate::database::store::UserStore;

#[derive(Clone)]
pub struct AppState {
    /// Primary SQLite pool, used directly by the record CRUD and reports.
    pub db: Pool<Sqlite>,
    /// Ordered backends for user lookups and password writes: primary
    /// first, then the optional secondary mirror.
    pub stores: Vec<Arc<dyn UserStore>>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "Backend is running" }))
        .merge(routes::api_routes())
        .with_state(state)
}

pub async fn run_server(state: AppState, bind_addr: &str) -> anyhow::Result<()> {
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
