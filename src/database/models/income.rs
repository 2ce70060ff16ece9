use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyIncome {
    pub income_id: i64,
    pub user_id: i64,
    pub month: String, // "YYYY-MM"
    pub source: String,
    pub amount: Decimal,
    pub date_received: String,
    pub notes: Option<String>,
}
