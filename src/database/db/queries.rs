use rust_decimal::Decimal;
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;

use crate::database::models::{Budget, Expense, FinancialGoal, MonthlyIncome, Saving, User};

/*
This file contains the SQLite CRUD logic for the primary store:
the register (user) table plus the five financial record tables.
 */

// Amounts are stored as TEXT; decode failures surface as sqlx decode errors.
fn parse_amount(text: &str, column: &str) -> Result<Decimal, sqlx::Error> {
    Decimal::from_str(text)
        .map_err(|e| sqlx::Error::Decode(format!("Invalid Decimal in {}: {}", column, e).into()))
}

/*==========User Queries=========== */

pub async fn create_user(
    pool: &Pool<Sqlite>,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO register (username, email, password, created_at)
        VALUES (?, ?, ?, datetime('now'))
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

pub async fn get_user_by_id(pool: &Pool<Sqlite>, user_id: i64) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT user_id, username, email, password, created_at
        FROM register
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    row.map(map_user).transpose()
}

pub async fn get_user_by_email(pool: &Pool<Sqlite>, email: &str) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT user_id, username, email, password, created_at
        FROM register
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.map(map_user).transpose()
}

pub async fn update_password(
    pool: &Pool<Sqlite>,
    user_id: i64,
    password_hash: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE register
        SET password = ?
        WHERE user_id = ?
        "#,
    )
    .bind(password_hash)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

fn map_user(row: sqlx::sqlite::SqliteRow) -> Result<User, sqlx::Error> {
    Ok(User {
        user_id: row.try_get("user_id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        password: row.try_get("password")?,
        created_at: row.try_get("created_at")?,
    })
}

/*==========Income Queries=========== */

pub async fn create_income(
    pool: &Pool<Sqlite>,
    user_id: i64,
    month: &str,
    source: &str,
    amount: Decimal,
    date_received: &str,
    notes: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO monthly_income (user_id, month, source, amount, date_received, notes)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING income_id
        "#,
    )
    .bind(user_id)
    .bind(month)
    .bind(source)
    .bind(amount.to_string())
    .bind(date_received)
    .bind(notes)
    .fetch_one(pool)
    .await?;

    row.try_get("income_id")
}

pub async fn get_income_by_user(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Vec<MonthlyIncome>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT income_id, user_id, month, source, amount, date_received, notes
        FROM monthly_income
        WHERE user_id = ?
        ORDER BY income_id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|row| {
        let amount_text: String = row.try_get("amount")?;
        Ok(MonthlyIncome {
            income_id: row.try_get("income_id")?,
            user_id: row.try_get("user_id")?,
            month: row.try_get("month")?,
            source: row.try_get("source")?,
            amount: parse_amount(&amount_text, "monthly_income.amount")?,
            date_received: row.try_get("date_received")?,
            notes: row.try_get("notes")?,
        })
    })
    .collect()
}

pub async fn update_income(
    pool: &Pool<Sqlite>,
    income_id: i64,
    month: &str,
    source: &str,
    amount: Decimal,
    date_received: &str,
    notes: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE monthly_income
        SET month = ?, source = ?, amount = ?, date_received = ?, notes = ?
        WHERE income_id = ?
        "#,
    )
    .bind(month)
    .bind(source)
    .bind(amount.to_string())
    .bind(date_received)
    .bind(notes)
    .bind(income_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_income(pool: &Pool<Sqlite>, income_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM monthly_income WHERE income_id = ?")
        .bind(income_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/*==========Savings Queries=========== */

pub async fn create_saving(
    pool: &Pool<Sqlite>,
    user_id: i64,
    month: &str,
    amount: Decimal,
    category: &str,
    method: &str,
    date_saved: &str,
    notes: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO savings (user_id, month, amount, category, method, date_saved, notes)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING saving_id
        "#,
    )
    .bind(user_id)
    .bind(month)
    .bind(amount.to_string())
    .bind(category)
    .bind(method)
    .bind(date_saved)
    .bind(notes)
    .fetch_one(pool)
    .await?;

    row.try_get("saving_id")
}

pub async fn get_savings_by_user(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Vec<Saving>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT saving_id, user_id, month, amount, category, method, date_saved, notes
        FROM savings
        WHERE user_id = ?
        ORDER BY saving_id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|row| {
        let amount_text: String = row.try_get("amount")?;
        Ok(Saving {
            saving_id: row.try_get("saving_id")?,
            user_id: row.try_get("user_id")?,
            month: row.try_get("month")?,
            amount: parse_amount(&amount_text, "savings.amount")?,
            category: row.try_get("category")?,
            method: row.try_get("method")?,
            date_saved: row.try_get("date_saved")?,
            notes: row.try_get("notes")?,
        })
    })
    .collect()
}

pub async fn update_saving(
    pool: &Pool<Sqlite>,
    saving_id: i64,
    month: &str,
    amount: Decimal,
    category: &str,
    method: &str,
    date_saved: &str,
    notes: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE savings
        SET month = ?, amount = ?, category = ?, method = ?, date_saved = ?, notes = ?
        WHERE saving_id = ?
        "#,
    )
    .bind(month)
    .bind(amount.to_string())
    .bind(category)
    .bind(method)
    .bind(date_saved)
    .bind(notes)
    .bind(saving_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_saving(pool: &Pool<Sqlite>, saving_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM savings WHERE saving_id = ?")
        .bind(saving_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/*==========Expense Queries=========== */

pub async fn create_expense(
    pool: &Pool<Sqlite>,
    user_id: i64,
    month: &str,
    category: &str,
    amount: Decimal,
    date_spent: &str,
    payment_method: &str,
    notes: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO expenses (user_id, month, category, amount, date_spent, payment_method, notes)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING expense_id
        "#,
    )
    .bind(user_id)
    .bind(month)
    .bind(category)
    .bind(amount.to_string())
    .bind(date_spent)
    .bind(payment_method)
    .bind(notes)
    .fetch_one(pool)
    .await?;

    row.try_get("expense_id")
}

pub async fn get_expenses_by_user(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Vec<Expense>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT expense_id, user_id, month, category, amount, date_spent, payment_method, notes
        FROM expenses
        WHERE user_id = ?
        ORDER BY expense_id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|row| {
        let amount_text: String = row.try_get("amount")?;
        Ok(Expense {
            expense_id: row.try_get("expense_id")?,
            user_id: row.try_get("user_id")?,
            month: row.try_get("month")?,
            category: row.try_get("category")?,
            amount: parse_amount(&amount_text, "expenses.amount")?,
            date_spent: row.try_get("date_spent")?,
            payment_method: row.try_get("payment_method")?,
            notes: row.try_get("notes")?,
        })
    })
    .collect()
}

pub async fn update_expense(
    pool: &Pool<Sqlite>,
    expense_id: i64,
    month: &str,
    category: &str,
    amount: Decimal,
    date_spent: &str,
    payment_method: &str,
    notes: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE expenses
        SET month = ?, category = ?, amount = ?, date_spent = ?, payment_method = ?, notes = ?
        WHERE expense_id = ?
        "#,
    )
    .bind(month)
    .bind(category)
    .bind(amount.to_string())
    .bind(date_spent)
    .bind(payment_method)
    .bind(notes)
    .bind(expense_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_expense(pool: &Pool<Sqlite>, expense_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM expenses WHERE expense_id = ?")
        .bind(expense_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/*==========Budget Queries=========== */

pub async fn create_budget(
    pool: &Pool<Sqlite>,
    user_id: i64,
    month: &str,
    category: &str,
    planned_amount: Decimal,
    actual_amount: Decimal,
    notes: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO budget (user_id, month, category, planned_amount, actual_amount, notes)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING budget_id
        "#,
    )
    .bind(user_id)
    .bind(month)
    .bind(category)
    .bind(planned_amount.to_string())
    .bind(actual_amount.to_string())
    .bind(notes)
    .fetch_one(pool)
    .await?;

    row.try_get("budget_id")
}

pub async fn get_budgets_by_user(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Vec<Budget>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT budget_id, user_id, month, category, planned_amount, actual_amount, notes
        FROM budget
        WHERE user_id = ?
        ORDER BY budget_id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|row| {
        let planned_text: String = row.try_get("planned_amount")?;
        let actual_text: String = row.try_get("actual_amount")?;
        Ok(Budget {
            budget_id: row.try_get("budget_id")?,
            user_id: row.try_get("user_id")?,
            month: row.try_get("month")?,
            category: row.try_get("category")?,
            planned_amount: parse_amount(&planned_text, "budget.planned_amount")?,
            actual_amount: parse_amount(&actual_text, "budget.actual_amount")?,
            notes: row.try_get("notes")?,
        })
    })
    .collect()
}

pub async fn update_budget(
    pool: &Pool<Sqlite>,
    budget_id: i64,
    month: &str,
    category: &str,
    planned_amount: Decimal,
    actual_amount: Decimal,
    notes: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE budget
        SET month = ?, category = ?, planned_amount = ?, actual_amount = ?, notes = ?
        WHERE budget_id = ?
        "#,
    )
    .bind(month)
    .bind(category)
    .bind(planned_amount.to_string())
    .bind(actual_amount.to_string())
    .bind(notes)
    .bind(budget_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_budget(pool: &Pool<Sqlite>, budget_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM budget WHERE budget_id = ?")
        .bind(budget_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/*==========Goal Queries=========== */

pub async fn create_goal(
    pool: &Pool<Sqlite>,
    user_id: i64,
    goal_name: &str,
    target_amount: Decimal,
    current_amount: Decimal,
    target_date: &str,
    notes: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO financial_goals (user_id, goal_name, target_amount, current_amount, target_date, notes)
        VALUES (?, ?, ?, ?, ?, ?)
        RETURNING goal_id
        "#,
    )
    .bind(user_id)
    .bind(goal_name)
    .bind(target_amount.to_string())
    .bind(current_amount.to_string())
    .bind(target_date)
    .bind(notes)
    .fetch_one(pool)
    .await?;

    row.try_get("goal_id")
}

pub async fn get_goals_by_user(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Vec<FinancialGoal>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT goal_id, user_id, goal_name, target_amount, current_amount, target_date, notes
        FROM financial_goals
        WHERE user_id = ?
        ORDER BY target_date DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?
    .into_iter()
    .map(|row| {
        let target_text: String = row.try_get("target_amount")?;
        let current_text: String = row.try_get("current_amount")?;
        Ok(FinancialGoal {
            goal_id: row.try_get("goal_id")?,
            user_id: row.try_get("user_id")?,
            goal_name: row.try_get("goal_name")?,
            target_amount: parse_amount(&target_text, "financial_goals.target_amount")?,
            current_amount: parse_amount(&current_text, "financial_goals.current_amount")?,
            target_date: row.try_get("target_date")?,
            notes: row.try_get("notes")?,
        })
    })
    .collect()
}

pub async fn update_goal(
    pool: &Pool<Sqlite>,
    goal_id: i64,
    goal_name: &str,
    target_amount: Decimal,
    current_amount: Decimal,
    target_date: &str,
    notes: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE financial_goals
        SET goal_name = ?, target_amount = ?, current_amount = ?, target_date = ?, notes = ?
        WHERE goal_id = ?
        "#,
    )
    .bind(goal_name)
    .bind(target_amount.to_string())
    .bind(current_amount.to_string())
    .bind(target_date)
    .bind(notes)
    .bind(goal_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_goal(pool: &Pool<Sqlite>, goal_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM financial_goals WHERE goal_id = ?")
        .bind(goal_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/*==========Report Queries=========== */

// Amounts are TEXT, so totals are summed in Rust rather than with SQL SUM.
async fn sum_amounts(
    pool: &Pool<Sqlite>,
    sql: &str,
    user_id: i64,
    month_pattern: &str,
) -> Result<Decimal, sqlx::Error> {
    let rows = sqlx::query(sql)
        .bind(user_id)
        .bind(month_pattern)
        .fetch_all(pool)
        .await?;

    let mut total = Decimal::ZERO;
    for row in rows {
        let text: String = row.try_get("amount")?;
        total += parse_amount(&text, "amount")?;
    }
    Ok(total)
}

/// Totals for one user over a month pattern (`"2024-05"` exact, `"2024-%"`
/// for a whole year). Returns (income, expenses, savings).
pub async fn totals_for_period(
    pool: &Pool<Sqlite>,
    user_id: i64,
    month_pattern: &str,
) -> Result<(Decimal, Decimal, Decimal), sqlx::Error> {
    let income = sum_amounts(
        pool,
        "SELECT amount FROM monthly_income WHERE user_id = ? AND month LIKE ?",
        user_id,
        month_pattern,
    )
    .await?;
    let expenses = sum_amounts(
        pool,
        "SELECT amount FROM expenses WHERE user_id = ? AND month LIKE ?",
        user_id,
        month_pattern,
    )
    .await?;
    let savings = sum_amounts(
        pool,
        "SELECT amount FROM savings WHERE user_id = ? AND month LIKE ?",
        user_id,
        month_pattern,
    )
    .await?;

    Ok((income, expenses, savings))
}
