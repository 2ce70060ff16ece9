use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialGoal {
    pub goal_id: i64,
    pub user_id: i64,
    pub goal_name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: String,
    pub notes: Option<String>,
}
