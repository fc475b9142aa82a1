//! Product catalogue models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::EntityId;

/// A product as listed by `/products`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub unit_cost: Decimal,
    #[serde(default)]
    pub alert_threshold: i64,
    #[serde(default)]
    pub image_path: Option<String>,
}

impl Product {
    /// Stock strictly below the alert threshold
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity < self.alert_threshold
    }

    pub fn stock_value(&self) -> Decimal {
        Decimal::from(self.stock_quantity) * self.unit_cost
    }
}

/// Create/edit form for a product
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    #[validate(length(min = 1, max = 200, message = "Product name is required"))]
    pub name: String,
    #[validate(custom = "crate::validation::validate_non_negative_decimal")]
    pub unit_cost: Decimal,
    #[validate(range(min = 0, message = "Stock quantity cannot be negative"))]
    pub stock_quantity: i64,
    #[validate(range(min = 0, message = "Alert threshold cannot be negative"))]
    pub alert_threshold: i64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Aggregate figures for dashboards and reports
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub product_count: usize,
    pub total_stock: i64,
    pub total_value: Decimal,
    pub low_stock_count: usize,
}
