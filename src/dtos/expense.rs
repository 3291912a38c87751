use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::expense::Expense;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    pub amount: f64,
    pub description: String,
    /// Defaults to now when omitted.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenseRequest {
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    pub id: i64,
    pub amount: f64,
    pub description: String,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<Expense> for ExpenseResponse {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id,
            amount: expense.amount,
            description: expense.description,
            date: expense.expense_date,
            created_at: expense.created_at,
        }
    }
}
