use std::sync::Arc;

use tracing::instrument;

use crate::appsheet::{tables, AppSheetClient};
use crate::cache::{CacheKey, ReportCache};
use crate::models::Item;

use super::{cached_fetch, or_empty};

/// Fetches the project-independent item catalog.
pub struct CatalogService {
    client: Arc<AppSheetClient>,
    cache: Arc<ReportCache>,
}

impl CatalogService {
    pub fn new(client: Arc<AppSheetClient>, cache: Arc<ReportCache>) -> Self {
        Self { client, cache }
    }

    /// The whole catalog, cached under `all-items`. Degrades to empty; a
    /// missing catalog only costs the joined display names.
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> Vec<Item> {
        let result = cached_fetch(&self.cache, &CacheKey::AllItems, || {
            self.client.find(tables::ITEMS, None)
        })
        .await;
        or_empty(result, "items")
    }
}
