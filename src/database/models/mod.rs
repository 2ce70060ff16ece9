pub mod user;
pub mod income;
pub mod saving;
pub mod expense;
pub mod budget;
pub mod goal;

pub use user::{PublicUser, User};
pub use income::MonthlyIncome;
pub use saving::Saving;
pub use expense::Expense;
pub use budget::Budget;
pub use goal::FinancialGoal;
