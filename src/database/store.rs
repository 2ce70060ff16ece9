use async_trait::async_trait;
use sqlx::{Pool, Postgres, Sqlite};

use crate::database::db::{queries, queries_postgre};
use crate::database::models::User;

/// Uniform interface over the user (`register`) table, implemented by every
/// backend. Handlers walk an ordered list of these instead of hard-coding
/// per-store fallback branches.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Name used in log lines and client-facing failure messages.
    fn name(&self) -> &'static str;

    async fn find_user_by_id(&self, user_id: i64) -> Result<Option<User>, sqlx::Error>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;

    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<i64, sqlx::Error>;

    /// Updating a nonexistent user id is not an error; 0 rows are affected.
    async fn update_password(&self, user_id: i64, password_hash: &str)
        -> Result<u64, sqlx::Error>;
}

/// Primary store: the local SQLite file.
#[derive(Clone)]
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for SqliteStore {
    fn name(&self) -> &'static str {
        "SQLite"
    }

    async fn find_user_by_id(&self, user_id: i64) -> Result<Option<User>, sqlx::Error> {
        queries::get_user_by_id(&self.pool, user_id).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        queries::get_user_by_email(&self.pool, email).await
    }

    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<i64, sqlx::Error> {
        queries::create_user(&self.pool, username, email, password_hash).await
    }

    async fn update_password(
        &self,
        user_id: i64,
        password_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        queries::update_password(&self.pool, user_id, password_hash).await
    }
}

/// Secondary store: the enterprise PostgreSQL mirror of the register table.
#[derive(Clone)]
pub struct PostgresStore {
    pool: Pool<Postgres>,
}

impl PostgresStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PostgresStore {
    fn name(&self) -> &'static str {
        "Postgres"
    }

    async fn find_user_by_id(&self, user_id: i64) -> Result<Option<User>, sqlx::Error> {
        queries_postgre::get_user_by_id(&self.pool, user_id).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        queries_postgre::get_user_by_email(&self.pool, email).await
    }

    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<i64, sqlx::Error> {
        queries_postgre::create_user(&self.pool, username, email, password_hash).await
    }

    async fn update_password(
        &self,
        user_id: i64,
        password_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        queries_postgre::update_password(&self.pool, user_id, password_hash).await
    }
}
