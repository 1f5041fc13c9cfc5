use serde::{Deserialize, Serialize};

use super::lenient_opt_f64;

/// A cut sheet belonging to a project. The stored quantities are only used as
/// a fallback when a sheet has no inventory movements at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    #[serde(rename = "Sheet ID")]
    pub sheet_id: String,
    #[serde(rename = "Project ID", default)]
    pub project_id: String,
    #[serde(rename = "Sheet Number", default)]
    pub sheet_number: String,
    #[serde(
        rename = "Quantity in Factory",
        default,
        deserialize_with = "lenient_opt_f64"
    )]
    pub quantity_in_factory: Option<f64>,
    #[serde(
        rename = "Quantity in Store",
        default,
        deserialize_with = "lenient_opt_f64"
    )]
    pub quantity_in_store: Option<f64>,
}

/// One inventory movement for a sheet. Positive quantity = received,
/// negative = used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetInventory {
    #[serde(rename = "Inventory ID", default)]
    pub inventory_id: String,
    #[serde(rename = "Sheet ID", default)]
    pub sheet_id: String,
    #[serde(rename = "Quantity", default, deserialize_with = "super::lenient_f64")]
    pub quantity: f64,
}
