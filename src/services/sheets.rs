use std::sync::Arc;

use tracing::instrument;

use crate::appsheet::{tables, AppSheetClient, Criterion, Selector};
use crate::cache::{CacheKey, ReportCache};
use crate::errors::ServiceError;
use crate::models::{Sheet, SheetInventory};
use crate::reports::sheets::{sheet_totals, SheetTotals};

use super::{or_empty, require_project_name};

/// Fetches a project's sheets plus their inventory movements and computes
/// received/used totals.
pub struct SheetService {
    client: Arc<AppSheetClient>,
    cache: Arc<ReportCache>,
}

impl SheetService {
    pub fn new(client: Arc<AppSheetClient>, cache: Arc<ReportCache>) -> Self {
        Self { client, cache }
    }

    /// Totals per sheet, cached under `sheets-{name}`. Inventory rows are
    /// fetched by an explicit sheet-id membership filter; when that fetch
    /// fails the stored-quantity fallback in the aggregation covers for it.
    #[instrument(skip(self))]
    pub async fn totals(&self, name: &str) -> Result<Vec<SheetTotals>, ServiceError> {
        let name = require_project_name(name)?;
        let key = CacheKey::Sheets(name.to_string());
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }

        let selector = Selector::all_of(tables::SHEETS, vec![Criterion::new("Project ID", name)]);
        let sheets: Vec<Sheet> =
            or_empty(self.client.find(tables::SHEETS, Some(selector)).await, "sheets");
        if sheets.is_empty() {
            // nothing to cache: either no sheets exist or the fetch failed
            return Ok(Vec::new());
        }

        let inventory = self.inventory_for(&sheets).await;
        let totals = sheet_totals(&sheets, &inventory);
        self.cache.set(&key, &totals);
        Ok(totals)
    }

    async fn inventory_for(&self, sheets: &[Sheet]) -> Vec<SheetInventory> {
        let ids = sheets.iter().map(|s| s.sheet_id.as_str());
        let selector = Selector::any_of(tables::SHEET_INVENTORY, "Sheet ID", ids);
        if selector.is_empty() {
            return Vec::new();
        }
        or_empty(
            self.client
                .find(tables::SHEET_INVENTORY, Some(selector))
                .await,
            "sheet inventory",
        )
    }
}
