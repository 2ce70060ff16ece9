use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Postgres, Sqlite};

pub async fn get_db_pool(db_url: &str) -> Result<Pool<Sqlite>, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await
}

/// Lazy pool for the secondary store: the server starts even when the
/// mirror is unreachable, and errors surface per query instead.
pub fn get_secondary_pool(db_url: &str) -> Result<Pool<Postgres>, sqlx::Error> {
    PgPoolOptions::new().max_connections(5).connect_lazy(db_url)
}
