use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::backend::error::ApiError;
use crate::backend::AppState;
use crate::database::db::queries;
use crate::database::models::{Budget, Expense, FinancialGoal, MonthlyIncome, Saving};

/*
Record CRUD. These tables live in the primary SQLite store only; the
secondary mirror carries just the register table.

The list routes take a user id; update/delete take the record's own id,
matching the original client.
 */

/*==========Income=========== */

#[derive(Debug, Deserialize)]
pub struct IncomePayload {
    pub user_id: i64,
    pub month: String,
    pub source: String,
    pub amount: Decimal,
    pub date_received: String,
    #[serde(default)]
    pub notes: Option<String>,
}

pub async fn list_income(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<MonthlyIncome>>, ApiError> {
    let rows = queries::get_income_by_user(&state.db, user_id).await?;
    Ok(Json(rows))
}

pub async fn create_income(
    State(state): State<AppState>,
    Json(p): Json<IncomePayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let income_id = queries::create_income(
        &state.db,
        p.user_id,
        &p.month,
        &p.source,
        p.amount,
        &p.date_received,
        p.notes.as_deref(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Income added successfully!", "income_id": income_id })),
    ))
}

pub async fn update_income(
    State(state): State<AppState>,
    Path(income_id): Path<i64>,
    Json(p): Json<IncomePayload>,
) -> Result<Json<Value>, ApiError> {
    let updated = queries::update_income(
        &state.db,
        income_id,
        &p.month,
        &p.source,
        p.amount,
        &p.date_received,
        p.notes.as_deref(),
    )
    .await?;

    if !updated {
        return Err(ApiError::NotFound("Income record"));
    }
    Ok(Json(json!({ "message": "Income updated successfully!" })))
}

pub async fn delete_income(
    State(state): State<AppState>,
    Path(income_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if !queries::delete_income(&state.db, income_id).await? {
        return Err(ApiError::NotFound("Income record"));
    }
    Ok(Json(json!({ "message": "Income deleted successfully!" })))
}

/*==========Savings=========== */

#[derive(Debug, Deserialize)]
pub struct SavingPayload {
    pub user_id: i64,
    pub month: String,
    pub amount: Decimal,
    pub category: String,
    pub method: String,
    pub date_saved: String,
    #[serde(default)]
    pub notes: Option<String>,
}

pub async fn list_savings(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Saving>>, ApiError> {
    let rows = queries::get_savings_by_user(&state.db, user_id).await?;
    Ok(Json(rows))
}

pub async fn create_saving(
    State(state): State<AppState>,
    Json(p): Json<SavingPayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let saving_id = queries::create_saving(
        &state.db,
        p.user_id,
        &p.month,
        p.amount,
        &p.category,
        &p.method,
        &p.date_saved,
        p.notes.as_deref(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Saving added successfully!", "saving_id": saving_id })),
    ))
}

pub async fn update_saving(
    State(state): State<AppState>,
    Path(saving_id): Path<i64>,
    Json(p): Json<SavingPayload>,
) -> Result<Json<Value>, ApiError> {
    let updated = queries::update_saving(
        &state.db,
        saving_id,
        &p.month,
        p.amount,
        &p.category,
        &p.method,
        &p.date_saved,
        p.notes.as_deref(),
    )
    .await?;

    if !updated {
        return Err(ApiError::NotFound("Saving record"));
    }
    Ok(Json(json!({ "message": "Saving updated successfully!" })))
}

pub async fn delete_saving(
    State(state): State<AppState>,
    Path(saving_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if !queries::delete_saving(&state.db, saving_id).await? {
        return Err(ApiError::NotFound("Saving record"));
    }
    Ok(Json(json!({ "message": "Saving deleted successfully!" })))
}

/*==========Expenses=========== */

#[derive(Debug, Deserialize)]
pub struct ExpensePayload {
    pub user_id: i64,
    pub month: String,
    pub category: String,
    pub amount: Decimal,
    pub date_spent: String,
    pub payment_method: String,
    #[serde(default)]
    pub notes: Option<String>,
}

pub async fn list_expenses(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    let rows = queries::get_expenses_by_user(&state.db, user_id).await?;
    Ok(Json(rows))
}

pub async fn create_expense(
    State(state): State<AppState>,
    Json(p): Json<ExpensePayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let expense_id = queries::create_expense(
        &state.db,
        p.user_id,
        &p.month,
        &p.category,
        p.amount,
        &p.date_spent,
        &p.payment_method,
        p.notes.as_deref(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Expense added successfully!", "expense_id": expense_id })),
    ))
}

pub async fn update_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<i64>,
    Json(p): Json<ExpensePayload>,
) -> Result<Json<Value>, ApiError> {
    let updated = queries::update_expense(
        &state.db,
        expense_id,
        &p.month,
        &p.category,
        p.amount,
        &p.date_spent,
        &p.payment_method,
        p.notes.as_deref(),
    )
    .await?;

    if !updated {
        return Err(ApiError::NotFound("Expense record"));
    }
    Ok(Json(json!({ "message": "Expense updated successfully!" })))
}

pub async fn delete_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if !queries::delete_expense(&state.db, expense_id).await? {
        return Err(ApiError::NotFound("Expense record"));
    }
    Ok(Json(json!({ "message": "Expense deleted successfully!" })))
}

/*==========Budget=========== */

#[derive(Debug, Deserialize)]
pub struct BudgetPayload {
    pub user_id: i64,
    pub month: String,
    pub category: String,
    pub planned_amount: Decimal,
    #[serde(default)]
    pub actual_amount: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
}

pub async fn list_budgets(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Budget>>, ApiError> {
    let rows = queries::get_budgets_by_user(&state.db, user_id).await?;
    Ok(Json(rows))
}

pub async fn create_budget(
    State(state): State<AppState>,
    Json(p): Json<BudgetPayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let budget_id = queries::create_budget(
        &state.db,
        p.user_id,
        &p.month,
        &p.category,
        p.planned_amount,
        p.actual_amount,
        p.notes.as_deref(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Budget added successfully!", "budget_id": budget_id })),
    ))
}

pub async fn update_budget(
    State(state): State<AppState>,
    Path(budget_id): Path<i64>,
    Json(p): Json<BudgetPayload>,
) -> Result<Json<Value>, ApiError> {
    let updated = queries::update_budget(
        &state.db,
        budget_id,
        &p.month,
        &p.category,
        p.planned_amount,
        p.actual_amount,
        p.notes.as_deref(),
    )
    .await?;

    if !updated {
        return Err(ApiError::NotFound("Budget record"));
    }
    Ok(Json(json!({ "message": "Budget updated successfully!" })))
}

pub async fn delete_budget(
    State(state): State<AppState>,
    Path(budget_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if !queries::delete_budget(&state.db, budget_id).await? {
        return Err(ApiError::NotFound("Budget record"));
    }
    Ok(Json(json!({ "message": "Budget deleted successfully!" })))
}

/*==========Goals=========== */

#[derive(Debug, Deserialize)]
pub struct GoalPayload {
    pub user_id: i64,
    pub goal_name: String,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    pub target_date: String,
    #[serde(default)]
    pub notes: Option<String>,
}

pub async fn list_goals(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<FinancialGoal>>, ApiError> {
    let rows = queries::get_goals_by_user(&state.db, user_id).await?;
    Ok(Json(rows))
}

pub async fn create_goal(
    State(state): State<AppState>,
    Json(p): Json<GoalPayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let goal_id = queries::create_goal(
        &state.db,
        p.user_id,
        &p.goal_name,
        p.target_amount,
        p.current_amount,
        &p.target_date,
        p.notes.as_deref(),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Goal added successfully!", "goal_id": goal_id })),
    ))
}

pub async fn update_goal(
    State(state): State<AppState>,
    Path(goal_id): Path<i64>,
    Json(p): Json<GoalPayload>,
) -> Result<Json<Value>, ApiError> {
    let updated = queries::update_goal(
        &state.db,
        goal_id,
        &p.goal_name,
        p.target_amount,
        p.current_amount,
        &p.target_date,
        p.notes.as_deref(),
    )
    .await?;

    if !updated {
        return Err(ApiError::NotFound("Goal record"));
    }
    Ok(Json(json!({ "message": "Goal updated successfully!" })))
}

pub async fn delete_goal(
    State(state): State<AppState>,
    Path(goal_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if !queries::delete_goal(&state.db, goal_id).await? {
        return Err(ApiError::NotFound("Goal record"));
    }
    Ok(Json(json!({ "message": "Goal deleted successfully!" })))
}
