use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// How a product is counted: discrete pieces, or mass/volume.
///
/// Weight products keep `quantity_in_stock` and `selling_price`/`cost_price`
/// per kilogram (or liter); unit products count whole items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Unit,
    Weight,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Unit => "unit",
            ProductType::Weight => "weight",
        }
    }
}

/// Display unit for weight products (stock itself is kept in kg/l).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseUnit {
    #[default]
    Gram,
    Ml,
}

impl BaseUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseUnit::Gram => "gram",
            BaseUnit::Ml => "ml",
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: i64,
    pub owner_id: i64,
    pub product_name: String,
    pub cost_price: f64,
    pub selling_price: f64,
    pub quantity_in_stock: f64,
    pub product_type: String,
    pub base_unit: String,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// The column is TEXT with a CHECK constraint; anything unexpected is
    /// treated as a unit product, matching the legacy default.
    pub fn kind(&self) -> ProductType {
        if self.product_type == "weight" {
            ProductType::Weight
        } else {
            ProductType::Unit
        }
    }

    /// Unit label for stock quantities in user-facing messages.
    pub fn stock_unit(&self) -> &'static str {
        match self.kind() {
            ProductType::Weight => "kg",
            ProductType::Unit => "units",
        }
    }
}
