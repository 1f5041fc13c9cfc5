use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::appsheet::{tables, AppSheetClient, Criterion, Selector};
use crate::cache::{CacheKey, ReportCache};
use crate::errors::ServiceError;
use crate::models::PeopleAllowance;
use crate::reports::progress::{usage_percentage, AlertLevel, BarColor};

use super::{cached_fetch, or_empty, require_project_name};

/// One allowance row enriched with its usage classification, ready for the
/// dashboard's progress bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowanceStatus {
    pub kind: String,
    pub category: String,
    pub days_allowed: Option<f64>,
    pub days_used: f64,
    pub percentage: f64,
    /// Alert CSS class: "danger", "warning" or "".
    pub alert: String,
    /// Progress-bar color: "green", "yellowgreen" or "red".
    pub bar_color: String,
}

impl From<&PeopleAllowance> for AllowanceStatus {
    fn from(row: &PeopleAllowance) -> Self {
        let percentage = usage_percentage(row.days_used, row.days_allowed);
        Self {
            kind: row.kind.clone(),
            category: row.category.clone(),
            days_allowed: row.days_allowed,
            days_used: row.days_used,
            percentage,
            alert: AlertLevel::from_percentage(percentage).class().to_string(),
            bar_color: BarColor::from_percentage(percentage).css().to_string(),
        }
    }
}

/// Fetches personnel allowances and classifies their usage.
pub struct AllowanceService {
    client: Arc<AppSheetClient>,
    cache: Arc<ReportCache>,
}

impl AllowanceService {
    pub fn new(client: Arc<AppSheetClient>, cache: Arc<ReportCache>) -> Self {
        Self { client, cache }
    }

    async fn allowances_for(&self, name: &str) -> Vec<PeopleAllowance> {
        let key = CacheKey::Allowances(name.to_string());
        let result = cached_fetch(&self.cache, &key, || {
            let selector =
                Selector::all_of(tables::ALLOWANCES, vec![Criterion::new("Project ID", name)]);
            self.client.find(tables::ALLOWANCES, Some(selector))
        })
        .await;
        or_empty(result, "allowances")
    }

    /// Allowance rows with usage percentage, alert class and bar color.
    #[instrument(skip(self))]
    pub async fn statuses(&self, name: &str) -> Result<Vec<AllowanceStatus>, ServiceError> {
        let name = require_project_name(name)?;
        let rows = self.allowances_for(name).await;
        Ok(rows.iter().map(AllowanceStatus::from).collect())
    }
}
