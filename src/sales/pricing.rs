// src/sales/pricing.rs
//
// Pure per-line calculator: no I/O, no clamping, no rounding. Display
// formatting and stock sufficiency are the caller's concern.

use serde::{Deserialize, Serialize};

use super::SaleError;
use crate::dtos::sale::SaleLineRequest;
use crate::models::product::{Product, ProductType};

/// How the customer expressed the purchase. Absent on the wire means the
/// legacy mode: a unit count, or grams for weight products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleType {
    /// A fixed currency amount ("give me 30 rupees of rice").
    Price,
    Grams,
    #[serde(rename = "kg")]
    Kilograms,
}

impl SaleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleType::Price => "price",
            SaleType::Grams => "grams",
            SaleType::Kilograms => "kg",
        }
    }
}

/// Label persisted on the sold-item snapshot; a missing sale type is
/// recorded as the legacy `"unit"`.
pub fn sale_type_label(sale_type: Option<SaleType>) -> &'static str {
    sale_type.map(|t| t.as_str()).unwrap_or("unit")
}

/// Result of pricing one line.
///
/// `stock_to_deduct` is in the product's stock denomination (kg/l for weight
/// products, count for unit products); `display_quantity` is what the
/// customer sees (grams/ml, or count).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePricing {
    pub revenue: f64,
    pub profit: f64,
    pub stock_to_deduct: f64,
    pub display_quantity: f64,
}

/// Prices one requested line against a product snapshot.
///
/// Four arithmetic modes reconcile here: amount-based (`price`), gram- and
/// kilogram-denominated weight sales, and the legacy default (unit count,
/// or grams when the product is weight-typed).
pub fn price_line(product: &Product, line: &SaleLineRequest) -> Result<LinePricing, SaleError> {
    match line.sale_type {
        Some(SaleType::Price) => {
            let revenue = required_amount(line)?;
            if product.selling_price <= 0.0 {
                return Err(SaleError::InvalidSaleLine {
                    product_id: line.product_id,
                    reason: "product has no selling price set",
                });
            }
            match product.kind() {
                ProductType::Weight => {
                    let quantity_in_kg = revenue / product.selling_price;
                    Ok(LinePricing {
                        revenue,
                        profit: revenue - quantity_in_kg * product.cost_price,
                        stock_to_deduct: quantity_in_kg,
                        display_quantity: quantity_in_kg * 1000.0,
                    })
                }
                ProductType::Unit => {
                    let quantity = revenue / product.selling_price;
                    Ok(LinePricing {
                        revenue,
                        profit: revenue - quantity * product.cost_price,
                        stock_to_deduct: quantity,
                        display_quantity: quantity,
                    })
                }
            }
        }
        Some(SaleType::Grams) => {
            let grams = required_quantity(line)?;
            Ok(weight_sale(product, grams / 1000.0))
        }
        Some(SaleType::Kilograms) => {
            let kg = required_quantity(line)?;
            Ok(weight_sale(product, kg))
        }
        // Legacy lines carry no sale type: weight products were recorded in
        // grams, everything else as a unit count.
        None => {
            let quantity = required_quantity(line)?;
            match product.kind() {
                ProductType::Weight => Ok(weight_sale(product, quantity / 1000.0)),
                ProductType::Unit => Ok(LinePricing {
                    revenue: quantity * product.selling_price,
                    profit: (product.selling_price - product.cost_price) * quantity,
                    stock_to_deduct: quantity,
                    display_quantity: quantity,
                }),
            }
        }
    }
}

/// Weight-product arithmetic shared by the grams/kg/legacy-weight modes.
fn weight_sale(product: &Product, quantity_in_kg: f64) -> LinePricing {
    LinePricing {
        revenue: quantity_in_kg * product.selling_price,
        profit: (product.selling_price - product.cost_price) * quantity_in_kg,
        stock_to_deduct: quantity_in_kg,
        display_quantity: quantity_in_kg * 1000.0,
    }
}

fn required_amount(line: &SaleLineRequest) -> Result<f64, SaleError> {
    match line.total_amount {
        Some(amount) if amount >= 0.0 => Ok(amount),
        Some(_) => Err(SaleError::InvalidSaleLine {
            product_id: line.product_id,
            reason: "totalAmount cannot be negative",
        }),
        None => Err(SaleError::InvalidSaleLine {
            product_id: line.product_id,
            reason: "totalAmount is required for an amount-based sale",
        }),
    }
}

fn required_quantity(line: &SaleLineRequest) -> Result<f64, SaleError> {
    match line.quantity_sold {
        Some(quantity) if quantity >= 0.0 => Ok(quantity),
        Some(_) => Err(SaleError::InvalidSaleLine {
            product_id: line.product_id,
            reason: "quantitySold cannot be negative",
        }),
        None => Err(SaleError::InvalidSaleLine {
            product_id: line.product_id,
            reason: "quantitySold is required for this sale type",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(product_type: &str, selling_price: f64, cost_price: f64, stock: f64) -> Product {
        Product {
            id: 1,
            owner_id: 1,
            product_name: "Test".to_string(),
            cost_price,
            selling_price,
            quantity_in_stock: stock,
            product_type: product_type.to_string(),
            base_unit: "gram".to_string(),
            created_at: Utc::now(),
        }
    }

    fn line(sale_type: Option<SaleType>, quantity_sold: Option<f64>, total_amount: Option<f64>) -> SaleLineRequest {
        SaleLineRequest {
            product_id: 1,
            sale_type,
            quantity_sold,
            total_amount,
        }
    }

    #[test]
    fn amount_sale_of_weight_product() {
        // Rice at 60/kg costing 40/kg; customer pays 30.
        let rice = product("weight", 60.0, 40.0, 10.0);
        let priced = price_line(&rice, &line(Some(SaleType::Price), None, Some(30.0))).unwrap();
        assert_eq!(priced.revenue, 30.0);
        assert_eq!(priced.stock_to_deduct, 0.5);
        assert_eq!(priced.display_quantity, 500.0);
        assert_eq!(priced.profit, 10.0);
    }

    #[test]
    fn gram_sale_of_weight_product() {
        let rice = product("weight", 60.0, 40.0, 10.0);
        let priced = price_line(&rice, &line(Some(SaleType::Grams), Some(300.0), None)).unwrap();
        assert!((priced.revenue - 18.0).abs() < 1e-9);
        assert!((priced.profit - 6.0).abs() < 1e-9);
        assert!((priced.stock_to_deduct - 0.3).abs() < 1e-9);
        assert_eq!(priced.display_quantity, 300.0);
    }

    #[test]
    fn amount_sale_of_volume_product() {
        // Oil at 150/l costing 100/l; customer pays 75 for half a liter.
        let oil = product("weight", 150.0, 100.0, 5.0);
        let priced = price_line(&oil, &line(Some(SaleType::Price), None, Some(75.0))).unwrap();
        assert_eq!(priced.display_quantity, 500.0);
        assert_eq!(priced.stock_to_deduct, 0.5);
        assert_eq!(priced.profit, 25.0);
    }

    #[test]
    fn amount_sale_of_unit_product() {
        // Biscuits at 15 costing 10; 45 buys three packs.
        let biscuits = product("unit", 15.0, 10.0, 100.0);
        let priced = price_line(&biscuits, &line(Some(SaleType::Price), None, Some(45.0))).unwrap();
        assert_eq!(priced.display_quantity, 3.0);
        assert_eq!(priced.stock_to_deduct, 3.0);
        assert_eq!(priced.revenue, 45.0);
        assert_eq!(priced.profit, 15.0);
    }

    #[test]
    fn legacy_line_on_unit_product_is_a_count() {
        let biscuits = product("unit", 15.0, 10.0, 100.0);
        let priced = price_line(&biscuits, &line(None, Some(4.0), None)).unwrap();
        assert_eq!(priced.revenue, 60.0);
        assert_eq!(priced.profit, 20.0);
        assert_eq!(priced.stock_to_deduct, 4.0);
        assert_eq!(priced.display_quantity, 4.0);
    }

    #[test]
    fn legacy_line_on_weight_product_means_grams() {
        let rice = product("weight", 60.0, 40.0, 10.0);
        let legacy = price_line(&rice, &line(None, Some(300.0), None)).unwrap();
        let grams = price_line(&rice, &line(Some(SaleType::Grams), Some(300.0), None)).unwrap();
        assert_eq!(legacy, grams);
    }

    #[test]
    fn amount_and_kg_modes_agree() {
        // Paying A at P per kg must equal buying A/P kilograms outright.
        let rice = product("weight", 60.0, 40.0, 10.0);
        let by_amount = price_line(&rice, &line(Some(SaleType::Price), None, Some(30.0))).unwrap();
        let by_kg =
            price_line(&rice, &line(Some(SaleType::Kilograms), Some(30.0 / 60.0), None)).unwrap();
        assert!((by_amount.revenue - by_kg.revenue).abs() < 1e-9);
        assert!((by_amount.profit - by_kg.profit).abs() < 1e-9);
        assert!((by_amount.stock_to_deduct - by_kg.stock_to_deduct).abs() < 1e-9);
    }

    #[test]
    fn grams_and_kg_modes_agree() {
        let rice = product("weight", 60.0, 40.0, 10.0);
        let by_grams = price_line(&rice, &line(Some(SaleType::Grams), Some(750.0), None)).unwrap();
        let by_kg = price_line(&rice, &line(Some(SaleType::Kilograms), Some(0.75), None)).unwrap();
        assert!((by_grams.stock_to_deduct - by_kg.stock_to_deduct).abs() < 1e-12);
        assert!((by_grams.revenue - by_kg.revenue).abs() < 1e-12);
    }

    #[test]
    fn amount_sale_requires_total_amount() {
        let rice = product("weight", 60.0, 40.0, 10.0);
        let err = price_line(&rice, &line(Some(SaleType::Price), Some(300.0), None)).unwrap_err();
        assert!(matches!(err, SaleError::InvalidSaleLine { .. }));
    }

    #[test]
    fn amount_sale_rejects_unpriced_product() {
        let free = product("weight", 0.0, 0.0, 10.0);
        let err = price_line(&free, &line(Some(SaleType::Price), None, Some(10.0))).unwrap_err();
        assert!(matches!(err, SaleError::InvalidSaleLine { .. }));
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let rice = product("weight", 60.0, 40.0, 10.0);
        let err = price_line(&rice, &line(Some(SaleType::Grams), Some(-1.0), None)).unwrap_err();
        assert!(matches!(err, SaleError::InvalidSaleLine { .. }));
    }

    #[test]
    fn legacy_label_is_unit() {
        assert_eq!(sale_type_label(None), "unit");
        assert_eq!(sale_type_label(Some(SaleType::Kilograms)), "kg");
    }
}
