// src/main.rs
use std::sync::Arc;

use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use finance_tracker_backend::backend::{self, AppState};
use finance_tracker_backend::config::Config;
use finance_tracker_backend::database::db::{connection, migrate};
use finance_tracker_backend::database::store::{PostgresStore, SqliteStore, UserStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let pool = connection::get_db_pool(&config.database_url).await?;
    migrate::run_migrations(&pool).await?;

    let mut stores: Vec<Arc<dyn UserStore>> = vec![Arc::new(SqliteStore::new(pool.clone()))];
    match &config.secondary_database_url {
        Some(url) => {
            let secondary = connection::get_secondary_pool(url)?;
            stores.push(Arc::new(PostgresStore::new(secondary)));
        }
        None => info!("no secondary store configured, running on SQLite only"),
    }

    let state = AppState { db: pool, stores };

    backend::run_server(state, &config.bind_addr).await
}
