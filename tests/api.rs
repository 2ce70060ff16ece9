//! Integration tests driving the axum router against an in-memory SQLite
//! primary store.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use rust_decimal::Decimal;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};
use tower::util::ServiceExt;

use finance_tracker_backend::auth;
use finance_tracker_backend::backend::{app, AppState};
use finance_tracker_backend::database::db::migrate;
use finance_tracker_backend::database::models::User;
use finance_tracker_backend::database::store::{SqliteStore, UserStore};

async fn test_pool() -> Pool<Sqlite> {
    // one connection so every query sees the same in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    migrate::run_migrations(&pool).await.unwrap();
    pool
}

async fn test_state() -> AppState {
    let pool = test_pool().await;
    AppState {
        db: pool.clone(),
        stores: vec![Arc::new(SqliteStore::new(pool))],
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register_user(state: &AppState, username: &str, email: &str, password: &str) -> i64 {
    let res = app(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/register",
            json!({ "username": username, "email": email, "password": password }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = body_json(res).await;
    body["user_id"].as_i64().unwrap()
}

async fn stored_hash(pool: &Pool<Sqlite>, user_id: i64) -> String {
    sqlx::query("SELECT password FROM register WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
        .try_get("password")
        .unwrap()
}

/// A secondary store whose every operation fails, standing in for an
/// unreachable mirror.
struct UnreachableStore;

#[async_trait]
impl UserStore for UnreachableStore {
    fn name(&self) -> &'static str {
        "Postgres"
    }

    async fn find_user_by_id(&self, _user_id: i64) -> Result<Option<User>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn find_user_by_email(&self, _email: &str) -> Result<Option<User>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn create_user(
        &self,
        _username: &str,
        _email: &str,
        _password_hash: &str,
    ) -> Result<i64, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn update_password(
        &self,
        _user_id: i64,
        _password_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }
}

#[tokio::test]
async fn get_user_returns_profile_without_password() {
    let state = test_state().await;
    let user_id = register_user(&state, "alice", "alice@example.com", "s3cret").await;

    let res = app(state.clone())
        .oneshot(get(&format!("/api/users/{}", user_id)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res).await;
    assert_eq!(body["user_id"], user_id);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn get_missing_user_is_404_after_all_stores() {
    let state = test_state().await;

    let res = app(state.clone())
        .oneshot(get("/api/users/999999"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res).await, json!({ "error": "User not found" }));
}

#[tokio::test]
async fn get_user_falls_back_when_primary_store_errors() {
    let pool = test_pool().await;
    let sqlite = SqliteStore::new(pool.clone());
    // broken store first, working store second
    let state = AppState {
        db: pool.clone(),
        stores: vec![Arc::new(UnreachableStore), Arc::new(sqlite)],
    };

    let user_id = register_user(&test_state_with_pool(pool).await, "bob", "bob@example.com", "pw")
        .await;

    let res = app(state)
        .oneshot(get(&format!("/api/users/{}", user_id)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["username"], "bob");
}

async fn test_state_with_pool(pool: Pool<Sqlite>) -> AppState {
    AppState {
        db: pool.clone(),
        stores: vec![Arc::new(SqliteStore::new(pool))],
    }
}

#[tokio::test]
async fn update_password_without_body_field_is_400_and_writes_nothing() {
    let state = test_state().await;
    let user_id = register_user(&state, "carol", "carol@example.com", "original").await;
    let before = stored_hash(&state.db, user_id).await;

    let res = app(state.clone())
        .oneshot(json_request(
            "POST",
            &format!("/api/users/{}/update-password", user_id),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await, json!({ "error": "Password is required" }));

    assert_eq!(stored_hash(&state.db, user_id).await, before);
}

#[tokio::test]
async fn update_password_stores_a_verifying_hash() {
    let state = test_state().await;
    let user_id = register_user(&state, "dave", "dave@example.com", "oldpass").await;

    let res = app(state.clone())
        .oneshot(json_request(
            "POST",
            &format!("/api/users/{}/update-password", user_id),
            json!({ "password": "abc123" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        body_json(res).await,
        json!({ "message": "Password updated successfully!" })
    );

    let hash = stored_hash(&state.db, user_id).await;
    assert!(auth::verify_password("abc123", &hash).unwrap());
    assert!(!auth::verify_password("oldpass", &hash).unwrap());
}

#[tokio::test]
async fn secondary_failure_returns_500_but_primary_already_changed() {
    let pool = test_pool().await;
    let state = AppState {
        db: pool.clone(),
        stores: vec![
            Arc::new(SqliteStore::new(pool.clone())),
            Arc::new(UnreachableStore),
        ],
    };
    // registration succeeds even though the mirror is down (best-effort)
    let user_id = register_user(&state, "erin", "erin@example.com", "first").await;

    let res = app(state.clone())
        .oneshot(json_request(
            "POST",
            &format!("/api/users/{}/update-password", user_id),
            json!({ "password": "second" }),
        ))
        .await
        .unwrap();

    // The endpoint reports the secondary failure...
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(res).await,
        json!({ "error": "Failed to update Postgres" })
    );

    // ...yet the primary store already holds the new hash. The stores are
    // now inconsistent; there is no rollback.
    let hash = stored_hash(&pool, user_id).await;
    assert!(auth::verify_password("second", &hash).unwrap());
    assert!(!auth::verify_password("first", &hash).unwrap());
}

#[tokio::test]
async fn update_password_for_unknown_id_still_succeeds() {
    // UPDATE with no matching row affects 0 rows and is not an error,
    // matching the original behavior.
    let state = test_state().await;

    let res = app(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/users/999999/update-password",
            json!({ "password": "whatever" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn register_rejects_duplicates_and_missing_fields() {
    let state = test_state().await;
    register_user(&state, "frank", "frank@example.com", "pw").await;

    let res = app(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/register",
            json!({ "username": "frank2", "email": "frank@example.com", "password": "pw" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = app(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/register",
            json!({ "username": "grace" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_verifies_against_the_stored_hash() {
    let state = test_state().await;
    let user_id = register_user(&state, "heidi", "heidi@example.com", "letmein").await;

    let res = app(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/login",
            json!({ "email": "heidi@example.com", "password": "letmein" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["user_id"], user_id);
    assert_eq!(body["username"], "heidi");

    let res = app(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/login",
            json!({ "email": "heidi@example.com", "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(res).await,
        json!({ "error": "Invalid email or password" })
    );
}

#[tokio::test]
async fn income_crud_round_trip() {
    let state = test_state().await;
    let user_id = register_user(&state, "ivan", "ivan@example.com", "pw").await;

    let res = app(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/income",
            json!({
                "user_id": user_id,
                "month": "2024-05",
                "source": "Salary",
                "amount": "2500.00",
                "date_received": "2024-05-01",
                "notes": "May paycheck"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let income_id = body_json(res).await["income_id"].as_i64().unwrap();

    let res = app(state.clone())
        .oneshot(get(&format!("/api/income/{}", user_id)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let list = body_json(res).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["source"], "Salary");

    let res = app(state.clone())
        .oneshot(json_request(
            "PUT",
            &format!("/api/income/{}", income_id),
            json!({
                "user_id": user_id,
                "month": "2024-05",
                "source": "Salary + bonus",
                "amount": "2800.00",
                "date_received": "2024-05-01"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app(state.clone())
        .oneshot(get(&format!("/api/income/{}", user_id)))
        .await
        .unwrap();
    let list = body_json(res).await;
    assert_eq!(list[0]["source"], "Salary + bonus");

    let res = app(state.clone())
        .oneshot(json_request(
            "DELETE",
            &format!("/api/income/{}", income_id),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // deleting again is a 404
    let res = app(state.clone())
        .oneshot(json_request(
            "DELETE",
            &format!("/api/income/{}", income_id),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn goals_and_budget_create_and_list() {
    let state = test_state().await;
    let user_id = register_user(&state, "judy", "judy@example.com", "pw").await;

    let res = app(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/goals",
            json!({
                "user_id": user_id,
                "goal_name": "Emergency fund",
                "target_amount": "5000",
                "current_amount": "1200",
                "target_date": "2025-06-30"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/budget",
            json!({
                "user_id": user_id,
                "month": "2024-05",
                "category": "Groceries",
                "planned_amount": "400"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app(state.clone())
        .oneshot(get(&format!("/api/goals/{}", user_id)))
        .await
        .unwrap();
    let goals = body_json(res).await;
    assert_eq!(goals[0]["goal_name"], "Emergency fund");

    let res = app(state.clone())
        .oneshot(get(&format!("/api/budget/{}", user_id)))
        .await
        .unwrap();
    let budgets = body_json(res).await;
    assert_eq!(budgets[0]["category"], "Groceries");
    // actual_amount defaults to zero when the client omits it
    let actual = Decimal::from_str(budgets[0]["actual_amount"].as_str().unwrap()).unwrap();
    assert_eq!(actual, Decimal::ZERO);
}

#[tokio::test]
async fn reports_aggregate_per_month_and_per_year() {
    let state = test_state().await;
    let user_id = register_user(&state, "kim", "kim@example.com", "pw").await;

    for (month, amount) in [("2024-05", "2000"), ("2024-06", "2100")] {
        let res = app(state.clone())
            .oneshot(json_request(
                "POST",
                "/api/income",
                json!({
                    "user_id": user_id,
                    "month": month,
                    "source": "Salary",
                    "amount": amount,
                    "date_received": format!("{}-01", month)
                }),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = app(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/expenses",
            json!({
                "user_id": user_id,
                "month": "2024-05",
                "category": "Rent",
                "amount": "800.50",
                "date_spent": "2024-05-02",
                "payment_method": "bank transfer"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app(state.clone())
        .oneshot(json_request(
            "POST",
            "/api/savings",
            json!({
                "user_id": user_id,
                "month": "2024-05",
                "amount": "300",
                "category": "Emergency",
                "method": "bank transfer",
                "date_saved": "2024-05-03"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app(state.clone())
        .oneshot(get(&format!("/api/reports/{}/2024-05", user_id)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let report = body_json(res).await;
    let dec = |v: &Value| Decimal::from_str(v.as_str().unwrap()).unwrap();
    assert_eq!(report["month"], "2024-05");
    assert_eq!(dec(&report["total_income"]), Decimal::from_str("2000").unwrap());
    assert_eq!(dec(&report["total_expenses"]), Decimal::from_str("800.50").unwrap());
    assert_eq!(dec(&report["total_savings"]), Decimal::from_str("300").unwrap());
    assert_eq!(dec(&report["balance"]), Decimal::from_str("899.50").unwrap());

    let res = app(state.clone())
        .oneshot(get(&format!("/api/yearly-report/{}/2024", user_id)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let report = body_json(res).await;
    assert_eq!(report["year"], "2024");
    assert_eq!(dec(&report["total_income"]), Decimal::from_str("4100").unwrap());
    assert_eq!(dec(&report["balance"]), Decimal::from_str("2999.50").unwrap());

    // other users see empty reports
    let res = app(state.clone())
        .oneshot(get("/api/reports/424242/2024-05"))
        .await
        .unwrap();
    let report = body_json(res).await;
    assert_eq!(dec(&report["total_income"]), Decimal::ZERO);

    // a malformed month is rejected rather than treated as a pattern
    let res = app(state.clone())
        .oneshot(get(&format!("/api/reports/{}/2024-%25", user_id)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
