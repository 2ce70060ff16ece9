use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Saving {
    pub saving_id: i64,
    pub user_id: i64,
    pub month: String,
    pub amount: Decimal,
    pub category: String,
    pub method: String, // cash/bank transfer/...
    pub date_saved: String,
    pub notes: Option<String>,
}
