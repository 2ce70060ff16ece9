use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub expense_id: i64,
    pub user_id: i64,
    pub month: String,
    pub category: String,
    pub amount: Decimal,
    pub date_spent: String,
    pub payment_method: String,
    pub notes: Option<String>,
}
