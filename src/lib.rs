//! Sitedash API Library
//!
//! Reporting backend for a construction fit-out dashboard. Data lives in an
//! AppSheet app; this crate fetches it through the table API, caches the raw
//! collections with per-key TTLs, aggregates them into report structures
//! (materials by category, sheet totals, delivery trips, allowance usage) and
//! serves the results as JSON.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod appsheet;
pub mod cache;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod reports;
pub mod services;

use std::sync::Arc;

use cache::ReportCache;
use services::AppServices;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub cache: Arc<ReportCache>,
    pub services: AppServices,
}

impl AppState {
    /// Wire the client, cache and services from a loaded configuration.
    pub fn from_config(config: config::AppConfig) -> Result<Self, errors::ServiceError> {
        let client = Arc::new(appsheet::AppSheetClient::new(config.appsheet.clone())?);
        let cache = Arc::new(ReportCache::with_system_clock((&config.cache).into()));
        let services = AppServices::new(client, cache.clone());
        Ok(Self {
            config,
            cache,
            services,
        })
    }
}
