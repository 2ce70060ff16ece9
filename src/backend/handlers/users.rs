use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::auth;
use crate::backend::error::ApiError;
use crate::backend::AppState;
use crate::database::models::PublicUser;

/// GET /api/users/:user_id
///
/// Walks the ordered stores. A store error or miss falls through to the
/// next one; only when every store has been consulted does this 404.
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<PublicUser>, ApiError> {
    for store in &state.stores {
        match store.find_user_by_id(user_id).await {
            Ok(Some(user)) => return Ok(Json(PublicUser::from(&user))),
            Ok(None) => {}
            Err(e) => warn!(store = store.name(), error = %e, "user lookup failed"),
        }
    }

    Err(ApiError::NotFound("User"))
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePasswordRequest {
    #[serde(default)]
    pub password: Option<String>,
}

/// POST /api/users/:user_id/update-password
///
/// Hashes once, then writes the hash to each store in order. The first
/// failing store aborts the sequence, so earlier stores keep the new hash
/// while later ones were never attempted. No rollback.
pub async fn update_password(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(body): Json<UpdatePasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    let password = match body.password.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => return Err(ApiError::Validation("Password is required".to_string())),
    };

    let hashed = auth::hash_password(password)?;

    for store in &state.stores {
        if let Err(e) = store.update_password(user_id, &hashed).await {
            error!(store = store.name(), error = %e, "password update failed");
            return Err(ApiError::StoreWrite(store.name()));
        }
    }

    Ok(Json(json!({ "message": "Password updated successfully!" })))
}

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// POST /api/register
///
/// The insert goes to the primary store; the secondary mirror is
/// best-effort and a mirror failure is only logged.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let (username, email, password) = match (
        body.username.as_deref(),
        body.email.as_deref(),
        body.password.as_deref(),
    ) {
        (Some(u), Some(e), Some(p)) if !u.is_empty() && !e.is_empty() && !p.is_empty() => {
            (u, e, p)
        }
        _ => {
            return Err(ApiError::Validation(
                "Username, email and password are required".to_string(),
            ))
        }
    };

    let hashed = auth::hash_password(password)?;

    let primary = &state.stores[0];
    let user_id = match primary.create_user(username, email, &hashed).await {
        Ok(id) => id,
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            return Err(ApiError::Conflict)
        }
        Err(e) => return Err(ApiError::Database(e)),
    };

    for store in &state.stores[1..] {
        if let Err(e) = store.create_user(username, email, &hashed).await {
            warn!(store = store.name(), error = %e, "user mirror failed");
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully!",
            "user_id": user_id,
        })),
    ))
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// POST /api/login
///
/// Same primary-then-secondary fallback as the lookup endpoint, then a
/// bcrypt verification against the stored hash.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let (email, password) = match (body.email.as_deref(), body.password.as_deref()) {
        (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e, p),
        _ => {
            return Err(ApiError::Validation(
                "Email and password are required".to_string(),
            ))
        }
    };

    let mut found = None;
    for store in &state.stores {
        match store.find_user_by_email(email).await {
            Ok(Some(user)) => {
                found = Some(user);
                break;
            }
            Ok(None) => {}
            Err(e) => warn!(store = store.name(), error = %e, "login lookup failed"),
        }
    }

    let user = found.ok_or(ApiError::Unauthorized)?;

    if !auth::verify_password(password, &user.password)? {
        return Err(ApiError::Unauthorized);
    }

    Ok(Json(json!({
        "message": "Login successful!",
        "user_id": user.user_id,
        "username": user.username,
        "email": user.email,
    })))
}
