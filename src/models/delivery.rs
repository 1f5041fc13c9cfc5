use serde::{Deserialize, Serialize};

/// A delivery event for a project. `Ready at` is an ambiguous day/month-first
/// timestamp; parsing lives in `reports::trips`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryDocket {
    #[serde(rename = "Docket ID")]
    pub docket_id: String,
    #[serde(rename = "Project ID", default)]
    pub project_id: String,
    #[serde(rename = "Ready at", default)]
    pub ready_at: String,
}
