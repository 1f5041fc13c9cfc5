use serde::{Deserialize, Serialize};

use super::lenient_opt_f64;

/// A construction project. `Name` is the row key in the AppSheet app, so all
/// project-scoped lookups (and cache keys) use the display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Status", default)]
    pub status: String,
    #[serde(rename = "Start Date", default)]
    pub start_date: String,
    #[serde(rename = "Handover Date", default)]
    pub handover_date: String,
    #[serde(rename = "Supervisor", default)]
    pub supervisor: String,
    #[serde(
        rename = "Expected Cut Area",
        default,
        deserialize_with = "lenient_opt_f64"
    )]
    pub expected_cut_area: Option<f64>,
    #[serde(
        rename = "Actual Cut Area",
        default,
        deserialize_with = "lenient_opt_f64"
    )]
    pub actual_cut_area: Option<f64>,
}
