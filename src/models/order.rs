use serde::{Deserialize, Serialize};

/// A material order placed for a project. `Project ID` holds the project's
/// display name (the project table's row key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "Order ID")]
    pub order_id: String,
    #[serde(rename = "Project ID", default)]
    pub project_id: String,
    #[serde(rename = "Order Number", default)]
    pub order_number: String,
    #[serde(rename = "Due Date", default)]
    pub due_date: String,
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "Requested By", default)]
    pub requested_by: String,
}
