use std::sync::Arc;

use tracing::instrument;

use crate::appsheet::{tables, AppSheetClient, Criterion, Selector};
use crate::cache::{CacheKey, ReportCache};
use crate::errors::ServiceError;
use crate::models::Project;

use super::{cached_fetch, or_empty, require_project_name};

/// Fetches the project list and single projects by display name.
pub struct ProjectService {
    client: Arc<AppSheetClient>,
    cache: Arc<ReportCache>,
}

impl ProjectService {
    pub fn new(client: Arc<AppSheetClient>, cache: Arc<ReportCache>) -> Self {
        Self { client, cache }
    }

    /// All projects, cached under the long-TTL `all-projects` key. A failed
    /// fetch degrades to an empty list.
    #[instrument(skip(self))]
    pub async fn list_projects(&self) -> Vec<Project> {
        let result = cached_fetch(&self.cache, &CacheKey::AllProjects, || {
            self.client.find(tables::PROJECTS, None)
        })
        .await;
        or_empty(result, "projects")
    }

    /// A single project by its display name. `Ok(None)` means the backend
    /// answered and no such project exists; transport and API errors
    /// propagate so the dashboard can show its error banner.
    #[instrument(skip(self))]
    pub async fn project_by_name(&self, name: &str) -> Result<Option<Project>, ServiceError> {
        let name = require_project_name(name)?;
        let key = CacheKey::Project(name.to_string());
        if let Some(hit) = self.cache.get::<Project>(&key) {
            return Ok(Some(hit));
        }

        let selector = Selector::all_of(tables::PROJECTS, vec![Criterion::new("Name", name)]);
        let rows: Vec<Project> = self.client.find(tables::PROJECTS, Some(selector)).await?;
        match rows.into_iter().next() {
            Some(project) => {
                self.cache.set(&key, &project);
                Ok(Some(project))
            }
            None => Ok(None),
        }
    }
}
