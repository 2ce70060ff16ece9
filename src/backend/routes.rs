use axum::routing::{get, post};
use axum::Router;

use crate::backend::handlers::{records, reports, users};
use crate::backend::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Users
        .route("/api/register", post(users::register))
        .route("/api/login", post(users::login))
        .route("/api/users/:user_id", get(users::get_user))
        .route(
            "/api/users/:user_id/update-password",
            post(users::update_password),
        )
        // Income
        .route("/api/income", post(records::create_income))
        .route(
            "/api/income/:id",
            get(records::list_income)
                .put(records::update_income)
                .delete(records::delete_income),
        )
        // Savings
        .route("/api/savings", post(records::create_saving))
        .route(
            "/api/savings/:id",
            get(records::list_savings)
                .put(records::update_saving)
                .delete(records::delete_saving),
        )
        // Expenses
        .route("/api/expenses", post(records::create_expense))
        .route(
            "/api/expenses/:id",
            get(records::list_expenses)
                .put(records::update_expense)
                .delete(records::delete_expense),
        )
        // Budget
        .route("/api/budget", post(records::create_budget))
        .route(
            "/api/budget/:id",
            get(records::list_budgets)
                .put(records::update_budget)
                .delete(records::delete_budget),
        )
        // Goals
        .route("/api/goals", post(records::create_goal))
        .route(
            "/api/goals/:id",
            get(records::list_goals)
                .put(records::update_goal)
                .delete(records::delete_goal),
        )
        // Reports
        .route("/api/reports/:user_id/:month", get(reports::monthly_report))
        .route(
            "/api/yearly-report/:user_id/:year",
            get(reports::yearly_report),
        )
}
