use std::sync::Arc;

use tracing::instrument;

use crate::appsheet::{tables, AppSheetClient, Criterion, Selector};
use crate::cache::{CacheKey, ReportCache};
use crate::errors::ServiceError;
use crate::models::DeliveryDocket;
use crate::reports::trips::{trip_report, TripDay};

use super::{cached_fetch, or_empty, require_project_name};

/// Fetches delivery dockets and aggregates them into the daily trip report.
pub struct DeliveryService {
    client: Arc<AppSheetClient>,
    cache: Arc<ReportCache>,
}

impl DeliveryService {
    pub fn new(client: Arc<AppSheetClient>, cache: Arc<ReportCache>) -> Self {
        Self { client, cache }
    }

    /// Raw dockets for a project, cached under `deliveries-{name}`.
    async fn dockets_for(&self, name: &str) -> Vec<DeliveryDocket> {
        let key = CacheKey::Deliveries(name.to_string());
        let result = cached_fetch(&self.cache, &key, || {
            let selector =
                Selector::all_of(tables::DELIVERIES, vec![Criterion::new("Project ID", name)]);
            self.client.find(tables::DELIVERIES, Some(selector))
        })
        .await;
        or_empty(result, "delivery dockets")
    }

    /// Daily delivery counts with a running cumulative sum. Aggregation is
    /// cheap, so only the raw dockets are cached.
    #[instrument(skip(self))]
    pub async fn trips(&self, name: &str) -> Result<Vec<TripDay>, ServiceError> {
        let name = require_project_name(name)?;
        let dockets = self.dockets_for(name).await;
        Ok(trip_report(&dockets))
    }
}
