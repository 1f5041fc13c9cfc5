//! Sheet totals: partition inventory movements by sign and sum per sheet.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Sheet, SheetInventory};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetTotals {
    pub sheet_id: String,
    pub sheet_number: String,
    pub total_received: f64,
    pub total_used: f64,
}

/// Compute received/used totals for each sheet, in the order the sheets were
/// given. Received = sum of positive inventory quantities, used = sum of
/// absolute values of negative ones. A sheet with no inventory rows at all
/// falls back to its stored quantities (`Quantity in Factory` counts as
/// received when positive, `Quantity in Store` as used when negative); the
/// fallback is never applied when inventory rows exist.
pub fn sheet_totals(sheets: &[Sheet], inventory: &[SheetInventory]) -> Vec<SheetTotals> {
    let mut rows_by_sheet: HashMap<&str, Vec<&SheetInventory>> = HashMap::new();
    for row in inventory {
        rows_by_sheet.entry(row.sheet_id.as_str()).or_default().push(row);
    }

    sheets
        .iter()
        .map(|sheet| {
            let rows = rows_by_sheet
                .get(sheet.sheet_id.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();

            let (total_received, total_used) = if rows.is_empty() {
                stored_fallback(sheet)
            } else {
                rows.iter().fold((0.0, 0.0), |(received, used), row| {
                    if row.quantity > 0.0 {
                        (received + row.quantity, used)
                    } else {
                        (received, used + row.quantity.abs())
                    }
                })
            };

            SheetTotals {
                sheet_id: sheet.sheet_id.clone(),
                sheet_number: sheet.sheet_number.clone(),
                total_received,
                total_used,
            }
        })
        .collect()
}

fn stored_fallback(sheet: &Sheet) -> (f64, f64) {
    let received = sheet
        .quantity_in_factory
        .filter(|q| *q > 0.0)
        .unwrap_or(0.0);
    let used = sheet
        .quantity_in_store
        .filter(|q| *q < 0.0)
        .map(f64::abs)
        .unwrap_or(0.0);
    (received, used)
}
