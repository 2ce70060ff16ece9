use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub budget_id: i64,
    pub user_id: i64,
    pub month: String,
    pub category: String,
    pub planned_amount: Decimal,
    pub actual_amount: Decimal,
    pub notes: Option<String>,
}
