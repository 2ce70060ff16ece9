use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::backend::error::ApiError;
use crate::backend::AppState;
use crate::database::db::queries;

#[derive(Debug, Serialize)]
pub struct MonthlyReport {
    pub month: String,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_savings: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Serialize)]
pub struct YearlyReport {
    pub year: String,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub total_savings: Decimal,
    pub balance: Decimal,
}

/// GET /api/reports/:user_id/:month  (month = "YYYY-MM")
pub async fn monthly_report(
    State(state): State<AppState>,
    Path((user_id, month)): Path<(i64, String)>,
) -> Result<Json<MonthlyReport>, ApiError> {
    // "2024-05" must be a real month, not a LIKE pattern
    if NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d").is_err() {
        return Err(ApiError::Validation("Invalid month, expected YYYY-MM".to_string()));
    }

    let (income, expenses, savings) =
        queries::totals_for_period(&state.db, user_id, &month).await?;

    Ok(Json(MonthlyReport {
        month,
        total_income: income,
        total_expenses: expenses,
        total_savings: savings,
        // what is left after spending and after money set aside
        balance: income - expenses - savings,
    }))
}

/// GET /api/yearly-report/:user_id/:year
pub async fn yearly_report(
    State(state): State<AppState>,
    Path((user_id, year)): Path<(i64, String)>,
) -> Result<Json<YearlyReport>, ApiError> {
    if year.parse::<i32>().is_err() {
        return Err(ApiError::Validation("Invalid year, expected YYYY".to_string()));
    }

    let pattern = format!("{}-%", year);
    let (income, expenses, savings) =
        queries::totals_for_period(&state.db, user_id, &pattern).await?;

    Ok(Json(YearlyReport {
        year,
        total_income: income,
        total_expenses: expenses,
        total_savings: savings,
        balance: income - expenses - savings,
    }))
}
