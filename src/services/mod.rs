//! Cache-through fetch services.
//!
//! Each service owns a shared AppSheet client and the report cache, checks the
//! cache before every remote call, and stores fresh results on the way out.
//! Fetch failures are logged and degrade to empty collections so the
//! dashboard renders "no data" instead of crashing; the single-project lookup
//! is the one place where "not found" is a meaningful outcome. There is no
//! single-flight de-duplication: two concurrent misses for the same key both
//! fetch and both overwrite the same entry, which is harmless for idempotent
//! reads.

pub mod allowances;
pub mod catalog;
pub mod deliveries;
pub mod materials;
pub mod projects;
pub mod sheets;

pub use allowances::{AllowanceService, AllowanceStatus};
pub use catalog::CatalogService;
pub use deliveries::DeliveryService;
pub use materials::MaterialsService;
pub use projects::ProjectService;
pub use sheets::SheetService;

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::appsheet::AppSheetClient;
use crate::cache::{CacheKey, ReportCache};
use crate::errors::ServiceError;

/// Services container handed to the HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub projects: Arc<ProjectService>,
    pub catalog: Arc<CatalogService>,
    pub materials: Arc<MaterialsService>,
    pub sheets: Arc<SheetService>,
    pub deliveries: Arc<DeliveryService>,
    pub allowances: Arc<AllowanceService>,
}

impl AppServices {
    pub fn new(client: Arc<AppSheetClient>, cache: Arc<ReportCache>) -> Self {
        let catalog = Arc::new(CatalogService::new(client.clone(), cache.clone()));
        Self {
            projects: Arc::new(ProjectService::new(client.clone(), cache.clone())),
            materials: Arc::new(MaterialsService::new(
                client.clone(),
                cache.clone(),
                catalog.clone(),
            )),
            sheets: Arc::new(SheetService::new(client.clone(), cache.clone())),
            deliveries: Arc::new(DeliveryService::new(client.clone(), cache.clone())),
            allowances: Arc::new(AllowanceService::new(client, cache.clone())),
            catalog,
        }
    }
}

/// A project-scoped call needs a non-blank name; a blank one means nothing is
/// selected and the request is simply not issued.
pub(crate) fn require_project_name(name: &str) -> Result<&str, ServiceError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::Validation(
            "project name must not be blank".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Cache-aside read: serve the cached collection when fresh, otherwise run
/// `fetch` and store its result.
pub(crate) async fn cached_fetch<T, F, Fut>(
    cache: &ReportCache,
    key: &CacheKey,
    fetch: F,
) -> Result<Vec<T>, ServiceError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<T>, ServiceError>>,
{
    if let Some(hit) = cache.get(key) {
        return Ok(hit);
    }
    let rows = fetch().await?;
    cache.set(key, &rows);
    Ok(rows)
}

/// Degrade a failed fetch to an empty collection, keeping the error visible
/// in the logs only.
pub(crate) fn or_empty<T>(result: Result<Vec<T>, ServiceError>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!(error = %e, "failed to fetch {what}, returning empty collection");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn blank_project_names_are_rejected_before_any_request() {
        assert_matches!(require_project_name(""), Err(ServiceError::Validation(_)));
        assert_matches!(require_project_name("   "), Err(ServiceError::Validation(_)));
        assert_eq!(require_project_name(" Tower B ").unwrap(), "Tower B");
    }

    #[test]
    fn or_empty_swallows_errors() {
        let rows = or_empty::<u32>(Err(ServiceError::Internal("boom".into())), "orders");
        assert!(rows.is_empty());
        let rows = or_empty(Ok(vec![1, 2]), "orders");
        assert_eq!(rows, vec![1, 2]);
    }
}
