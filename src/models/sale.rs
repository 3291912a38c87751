use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// One consolidated ledger entry. "Daily" is historical naming: each call to
/// the settlement engine appends one of these, and several may land on the
/// same calendar day.
#[derive(Debug, Clone, FromRow)]
pub struct DailySale {
    pub id: i64,
    pub owner_id: i64,
    pub sale_date: DateTime<Utc>,
    pub total_daily_revenue: f64,
    pub total_daily_profit: f64,
    pub created_at: DateTime<Utc>,
}

/// Immutable snapshot of one sold line. Prices are copied from the product
/// at sale time so later re-pricing never rewrites history.
#[derive(Debug, Clone, FromRow)]
pub struct SoldItem {
    pub id: i64,
    pub daily_sale_id: i64,
    pub product_id: i64,
    pub quantity_sold: f64,
    pub selling_price: f64,
    pub cost_price: f64,
    pub sale_type: String,
    pub revenue: f64,
    pub stock_deducted: f64,
}
