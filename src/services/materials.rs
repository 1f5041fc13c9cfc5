use std::sync::Arc;

use tracing::instrument;

use crate::appsheet::{tables, AppSheetClient, Criterion, Selector};
use crate::cache::{CacheKey, ReportCache};
use crate::errors::ServiceError;
use crate::models::{ItemRequest, Order};
use crate::reports::materials::{self, CategoryGroup, DetailEntry, SummaryEntry};

use super::{cached_fetch, or_empty, require_project_name, CatalogService};

/// Fetches orders and item requests for a project and assembles the materials
/// summary/detail reports.
pub struct MaterialsService {
    client: Arc<AppSheetClient>,
    cache: Arc<ReportCache>,
    catalog: Arc<CatalogService>,
}

impl MaterialsService {
    pub fn new(
        client: Arc<AppSheetClient>,
        cache: Arc<ReportCache>,
        catalog: Arc<CatalogService>,
    ) -> Self {
        Self {
            client,
            cache,
            catalog,
        }
    }

    async fn orders_for(&self, name: &str) -> Vec<Order> {
        let key = CacheKey::Orders(name.to_string());
        let result = cached_fetch(&self.cache, &key, || {
            let selector =
                Selector::all_of(tables::ORDERS, vec![Criterion::new("Project ID", name)]);
            self.client.find(tables::ORDERS, Some(selector))
        })
        .await;
        or_empty(result, "orders")
    }

    async fn item_requests_for(&self, name: &str) -> Vec<ItemRequest> {
        let key = CacheKey::ItemRequests(name.to_string());
        let result = cached_fetch(&self.cache, &key, || {
            let selector = Selector::all_of(
                tables::ITEM_REQUESTS,
                vec![Criterion::new("Project ID", name)],
            );
            self.client.find(tables::ITEM_REQUESTS, Some(selector))
        })
        .await;
        or_empty(result, "item requests")
    }

    /// Summary view: categories in fixed order, one merged entry per item id.
    /// The assembled report is cached under `materials-{name}`.
    #[instrument(skip(self))]
    pub async fn summary(
        &self,
        name: &str,
    ) -> Result<Vec<CategoryGroup<SummaryEntry>>, ServiceError> {
        let name = require_project_name(name)?;
        let key = CacheKey::Materials(name.to_string());
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }

        let (requests, orders, items) = tokio::join!(
            self.item_requests_for(name),
            self.orders_for(name),
            self.catalog.list_items(),
        );
        let report = materials::summarize(&requests, &items, &orders);
        self.cache.set(&key, &report);
        Ok(report)
    }

    /// Detail view: same partition, one entry per request row. Cheap to
    /// recompute, so only the underlying collections are cached.
    #[instrument(skip(self))]
    pub async fn detail(
        &self,
        name: &str,
    ) -> Result<Vec<CategoryGroup<DetailEntry>>, ServiceError> {
        let name = require_project_name(name)?;

        let (requests, orders, items) = tokio::join!(
            self.item_requests_for(name),
            self.orders_for(name),
            self.catalog.list_items(),
        );
        Ok(materials::detail(&requests, &items, &orders))
    }
}
