use serde::{Deserialize, Serialize};

use super::lenient_f64;

/// A catalog item, independent of any project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "Item ID")]
    pub item_id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Specification", default)]
    pub specification: String,
}

/// One requested line of an order, referencing a catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRequest {
    #[serde(rename = "Item Request ID")]
    pub item_request_id: String,
    #[serde(rename = "Project ID", default)]
    pub project_id: String,
    #[serde(rename = "Order ID", default)]
    pub order_id: String,
    #[serde(rename = "Item ID", default)]
    pub item_id: String,
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "Sub Category", default)]
    pub sub_category: String,
    #[serde(rename = "Quantity", default, deserialize_with = "lenient_f64")]
    pub quantity: f64,
}
