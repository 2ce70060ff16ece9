use anyhow::Result;
use sqlx::{Pool, Sqlite};

/// Applies the embedded migrations to the primary store. The secondary
/// mirror's register table is provisioned separately.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
