//! Row models for the AppSheet tables.
//!
//! All of these are read-only from this system's perspective: rows are
//! fetched, transformed and discarded per request. Field names mirror the
//! AppSheet column names via serde renames. AppSheet serves numeric columns
//! as JSON numbers or as numeric strings depending on the column type, so
//! quantity-like fields go through a lenient deserializer that accepts both.

mod allowance;
mod delivery;
mod item;
mod order;
mod project;
mod sheet;

pub use allowance::PeopleAllowance;
pub use delivery::DeliveryDocket;
pub use item::{Item, ItemRequest};
pub use order::Order;
pub use project::Project;
pub use sheet::{Sheet, SheetInventory};

use serde::{Deserialize, Deserializer};

/// Accept a number, a numeric string, or an empty/missing value (treated as
/// zero).
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_f64(deserializer)?.unwrap_or(0.0))
}

/// Accept a number, a numeric string, or an empty/missing value (`None`).
pub(crate) fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    match raw {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::Number(n)) => Ok(n.as_f64()),
        Some(serde_json::Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .replace(',', "")
                .parse::<f64>()
                .map(Some)
                .map_err(|_| {
                    serde::de::Error::custom(format!("invalid numeric string: {trimmed:?}"))
                })
        }
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected number or numeric string, got {other}"
        ))),
    }
}
