// src/sales/mod.rs
//
// Sale recording and stock settlement. `pricing` is the pure per-line
// calculator; `settlement` drives a whole batch against live inventory.

pub mod pricing;
pub mod settlement;

use thiserror::Error;

/// Tolerance for the stock-sufficiency check. Amount-based sales divide by
/// the selling price, so the computed deduction can overshoot the stored
/// stock by a rounding hair; a strict `<` would reject selling the last of
/// a product.
pub const STOCK_EPSILON: f64 = 1e-9;

/// True when `available` stock covers `required` within [`STOCK_EPSILON`].
pub fn has_sufficient_stock(available: f64, required: f64) -> bool {
    available + STOCK_EPSILON >= required
}

#[derive(Debug, Error)]
pub enum SaleError {
    #[error("itemsSold must be a non-empty array")]
    EmptyBatch,

    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    #[error(
        "Insufficient stock for {product_name}. Available: {available} {unit}, Required: {required:.3} {unit}"
    )]
    InsufficientStock {
        product_name: String,
        available: f64,
        required: f64,
        unit: &'static str,
    },

    #[error("Invalid sale line for product {product_id}: {reason}")]
    InvalidSaleLine {
        product_id: i64,
        reason: &'static str,
    },

    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sufficiency_is_epsilon_tolerant() {
        assert!(has_sufficient_stock(10.0, 10.0));
        assert!(has_sufficient_stock(0.5, 0.5 + 1e-12));
        assert!(!has_sufficient_stock(0.5, 0.6));
        assert!(!has_sufficient_stock(0.0, 0.001));
    }

    #[test]
    fn insufficient_stock_message_names_product_and_quantities() {
        let err = SaleError::InsufficientStock {
            product_name: "Rice".to_string(),
            available: 0.2,
            required: 0.5,
            unit: "kg",
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Rice. Available: 0.2 kg, Required: 0.500 kg"
        );
    }
}
