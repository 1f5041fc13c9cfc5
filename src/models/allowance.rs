use serde::{Deserialize, Serialize};

use super::{lenient_f64, lenient_opt_f64};

/// Per-project personnel allowance: allowed vs. used days for one
/// type/category pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeopleAllowance {
    #[serde(rename = "Allowance ID", default)]
    pub allowance_id: String,
    #[serde(rename = "Project ID", default)]
    pub project_id: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(rename = "Category", default)]
    pub category: String,
    #[serde(rename = "Days Allowed", default, deserialize_with = "lenient_opt_f64")]
    pub days_allowed: Option<f64>,
    #[serde(rename = "Days Used", default, deserialize_with = "lenient_f64")]
    pub days_used: f64,
}
