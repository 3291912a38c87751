use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct Expense {
    pub id: i64,
    pub owner_id: i64,
    pub amount: f64,
    pub description: String,
    pub expense_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
