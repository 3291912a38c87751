use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::sale::{DailySale, SoldItem};
use crate::sales::pricing::SaleType;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDailySaleRequest {
    pub items_sold: Vec<SaleLineRequest>,
}

/// One requested item in a sale batch. Which of `quantitySold`/`totalAmount`
/// is authoritative depends on `saleType`; the other is ignored and
/// recomputed. A missing `saleType` is the legacy mode.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineRequest {
    pub product_id: i64,
    #[serde(default)]
    pub sale_type: Option<SaleType>,
    #[serde(default)]
    pub quantity_sold: Option<f64>,
    #[serde(default)]
    pub total_amount: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySaleResponse {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub owner_id: i64,
    pub items_sold: Vec<SoldItemResponse>,
    pub total_daily_revenue: f64,
    pub total_daily_profit: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoldItemResponse {
    pub product_id: i64,
    pub quantity_sold: f64,
    pub selling_price: f64,
    pub cost_price: f64,
    pub sale_type: String,
    pub revenue: f64,
    pub stock_deducted: f64,
}

impl DailySaleResponse {
    pub fn from_parts(sale: DailySale, items: Vec<SoldItem>) -> Self {
        Self {
            id: sale.id,
            date: sale.sale_date,
            owner_id: sale.owner_id,
            items_sold: items.into_iter().map(SoldItemResponse::from).collect(),
            total_daily_revenue: sale.total_daily_revenue,
            total_daily_profit: sale.total_daily_profit,
        }
    }
}

impl From<SoldItem> for SoldItemResponse {
    fn from(item: SoldItem) -> Self {
        Self {
            product_id: item.product_id,
            quantity_sold: item.quantity_sold,
            selling_price: item.selling_price,
            cost_price: item.cost_price,
            sale_type: item.sale_type,
            revenue: item.revenue,
            stock_deducted: item.stock_deducted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_lines() {
        let body = r#"{"itemsSold":[
            {"productId":7,"saleType":"price","totalAmount":30},
            {"productId":8,"saleType":"grams","quantitySold":300},
            {"productId":9,"quantitySold":2}
        ]}"#;
        let req: CreateDailySaleRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.items_sold.len(), 3);
        assert_eq!(req.items_sold[0].sale_type, Some(SaleType::Price));
        assert_eq!(req.items_sold[0].total_amount, Some(30.0));
        assert_eq!(req.items_sold[1].sale_type, Some(SaleType::Grams));
        assert_eq!(req.items_sold[2].sale_type, None);
        assert_eq!(req.items_sold[2].quantity_sold, Some(2.0));
    }

    #[test]
    fn kg_is_the_wire_name_for_kilograms() {
        let line: SaleLineRequest =
            serde_json::from_str(r#"{"productId":1,"saleType":"kg","quantitySold":0.5}"#).unwrap();
        assert_eq!(line.sale_type, Some(SaleType::Kilograms));
    }

    #[test]
    fn response_uses_camel_case_keys() {
        let response = SoldItemResponse {
            product_id: 1,
            quantity_sold: 500.0,
            selling_price: 60.0,
            cost_price: 40.0,
            sale_type: "price".to_string(),
            revenue: 30.0,
            stock_deducted: 0.5,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("productId").is_some());
        assert!(json.get("stockDeducted").is_some());
        assert!(json.get("stock_deducted").is_none());
    }
}
