// src/dtos/product.rs
use serde::{Deserialize, Serialize};

use crate::models::product::{BaseUnit, Product, ProductType};

/// POST /products accepts either one product or an array for bulk creation.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CreateProductPayload {
    Bulk(Vec<CreateProductRequest>),
    Single(CreateProductRequest),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub product_name: String,
    pub cost_price: f64,
    pub selling_price: f64,
    #[serde(default)]
    pub quantity_in_stock: f64,
    #[serde(default)]
    pub product_type: ProductType,
    #[serde(default)]
    pub base_unit: BaseUnit,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub product_name: Option<String>,
    pub cost_price: Option<f64>,
    pub selling_price: Option<f64>,
    pub quantity_in_stock: Option<f64>,
    pub product_type: Option<ProductType>,
    pub base_unit: Option<BaseUnit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockRequest {
    pub quantity_to_add: f64,
}

/// GET /products/search?minPrice=..&maxPrice=.. filters on cost price.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeQuery {
    pub min_price: f64,
    pub max_price: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    #[serde(default)]
    pub product_type: Option<ProductType>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub product_name: String,
    pub cost_price: f64,
    pub selling_price: f64,
    pub quantity_in_stock: f64,
    pub product_type: String,
    pub base_unit: String,
    pub created_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            product_name: product.product_name,
            cost_price: product.cost_price,
            selling_price: product.selling_price,
            quantity_in_stock: product.quantity_in_stock,
            product_type: product.product_type,
            base_unit: product.base_unit,
            created_at: product.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_and_bulk_payloads_both_parse() {
        let single = r#"{"productName":"Rice","costPrice":40,"sellingPrice":60,
                         "quantityInStock":10,"productType":"weight","baseUnit":"gram"}"#;
        assert!(matches!(
            serde_json::from_str::<CreateProductPayload>(single).unwrap(),
            CreateProductPayload::Single(_)
        ));

        let bulk = r#"[{"productName":"A","costPrice":1,"sellingPrice":2},
                       {"productName":"B","costPrice":3,"sellingPrice":4}]"#;
        match serde_json::from_str::<CreateProductPayload>(bulk).unwrap() {
            CreateProductPayload::Bulk(items) => assert_eq!(items.len(), 2),
            CreateProductPayload::Single(_) => panic!("array parsed as single product"),
        }
    }

    #[test]
    fn omitted_fields_default_to_unit_product() {
        let req: CreateProductRequest =
            serde_json::from_str(r#"{"productName":"Biscuits","costPrice":10,"sellingPrice":15}"#)
                .unwrap();
        assert_eq!(req.quantity_in_stock, 0.0);
        assert_eq!(req.product_type, ProductType::Unit);
        assert_eq!(req.base_unit, BaseUnit::Gram);
    }
}
