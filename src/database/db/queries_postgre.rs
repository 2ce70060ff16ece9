use sqlx::{Pool, Postgres, Row};

use crate::database::models::User;

/*
This file contains the PostgreSQL query logic for the secondary store.
Only the register (user) table is mirrored there; financial records
live in the primary SQLite store alone.
 */

pub async fn create_user(
    pool: &Pool<Postgres>,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO register (username, email, password, created_at)
        VALUES ($1, $2, $3, NOW())
        RETURNING user_id
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    row.try_get("user_id")
}

pub async fn get_user_by_id(
    pool: &Pool<Postgres>,
    user_id: i64,
) -> Result<Option<User>, sqlx::Error> {
    // created_at cast to TEXT so both stores decode the same way
    let row = sqlx::query(
        r#"
        SELECT user_id, username, email, password, created_at::TEXT AS created_at
        FROM register
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    row.map(map_user).transpose()
}

pub async fn get_user_by_email(
    pool: &Pool<Postgres>,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT user_id, username, email, password, created_at::TEXT AS created_at
        FROM register
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.map(map_user).transpose()
}

pub async fn update_password(
    pool: &Pool<Postgres>,
    user_id: i64,
    password_hash: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE register
        SET password = $1
        WHERE user_id = $2
        "#,
    )
    .bind(password_hash)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

fn map_user(row: sqlx::postgres::PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        user_id: row.try_get("user_id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password: row.try_get("password")?,
        created_at: row.try_get("created_at")?,
    })
}
