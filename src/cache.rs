//! In-memory TTL cache for fetched report data.
//!
//! The cache is a plain string-keyed map of serialized JSON payloads. It is
//! consulted before every remote fetch and has exactly one guarantee: it never
//! serves a value older than its TTL. There is no size bound and no eviction
//! policy; expired entries are ignored on read and overwritten by the next
//! `set`. Concurrent in-flight fetches for the same key may both miss and both
//! write, which is fine because fetches are idempotent reads.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Time source for expiry checks, injectable so tests can advance time
/// deterministically.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time, used everywhere outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Per-key-class expiry durations. The full project list changes rarely and
/// gets a longer TTL than the project-scoped report data.
#[derive(Debug, Clone, Copy)]
pub struct TtlSettings {
    pub projects: Duration,
    pub default: Duration,
}

impl Default for TtlSettings {
    fn default() -> Self {
        Self {
            projects: Duration::from_secs(15 * 60),
            default: Duration::from_secs(5 * 60),
        }
    }
}

/// Closed set of cache key shapes. Every key except the two global ones is
/// namespaced by project display name, so renaming a project implicitly lands
/// its derived views in fresh, empty slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    AllProjects,
    AllItems,
    Project(String),
    Orders(String),
    Materials(String),
    ItemRequests(String),
    Sheets(String),
    Deliveries(String),
    Allowances(String),
}

impl CacheKey {
    fn project_scoped(name: &str) -> [CacheKey; 7] {
        let name = name.to_string();
        [
            CacheKey::Project(name.clone()),
            CacheKey::Orders(name.clone()),
            CacheKey::Materials(name.clone()),
            CacheKey::ItemRequests(name.clone()),
            CacheKey::Sheets(name.clone()),
            CacheKey::Deliveries(name.clone()),
            CacheKey::Allowances(name),
        ]
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::AllProjects => write!(f, "all-projects"),
            CacheKey::AllItems => write!(f, "all-items"),
            CacheKey::Project(name) => write!(f, "project-{name}"),
            CacheKey::Orders(name) => write!(f, "orders-{name}"),
            CacheKey::Materials(name) => write!(f, "materials-{name}"),
            CacheKey::ItemRequests(name) => write!(f, "items-requests-{name}"),
            CacheKey::Sheets(name) => write!(f, "sheets-{name}"),
            CacheKey::Deliveries(name) => write!(f, "deliveries-{name}"),
            CacheKey::Allowances(name) => write!(f, "allowances-{name}"),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: String,
    stored_at: Instant,
}

/// String-keyed map of `(serialized value, timestamp)` with per-key-class
/// TTLs. Owned by the fetch services, never a module-level singleton.
pub struct ReportCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttls: TtlSettings,
    clock: Arc<dyn Clock>,
}

impl ReportCache {
    pub fn new(ttls: TtlSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttls,
            clock,
        }
    }

    pub fn with_system_clock(ttls: TtlSettings) -> Self {
        Self::new(ttls, Arc::new(SystemClock))
    }

    fn ttl_for(&self, key: &CacheKey) -> Duration {
        match key {
            CacheKey::AllProjects => self.ttls.projects,
            _ => self.ttls.default,
        }
    }

    /// Fetch and deserialize a cached value. Misses when the key was never
    /// set, when the entry's age has reached its TTL, or when the stored
    /// payload no longer deserializes into `T`. Expired entries are left in
    /// place to be overwritten by the next `set`.
    pub fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let map = self.entries.read().unwrap_or_else(|e| e.into_inner());
        let entry = map.get(&key.to_string())?;
        if self.clock.now().duration_since(entry.stored_at) >= self.ttl_for(key) {
            debug!(%key, "cache entry expired");
            return None;
        }
        match serde_json::from_str(&entry.payload) {
            Ok(value) => {
                debug!(%key, "cache hit");
                Some(value)
            }
            Err(e) => {
                warn!(%key, error = %e, "failed to deserialize cached payload, treating as miss");
                None
            }
        }
    }

    /// Store a value under `key`, replacing any previous entry. Serialization
    /// failures are logged and skipped; caching is never fatal.
    pub fn set<T: Serialize>(&self, key: &CacheKey, value: &T) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(%key, error = %e, "failed to serialize value for cache");
                return;
            }
        };
        let mut map = self.entries.write().unwrap_or_else(|e| e.into_inner());
        map.insert(
            key.to_string(),
            CacheEntry {
                payload,
                stored_at: self.clock.now(),
            },
        );
    }

    pub fn invalidate(&self, key: &CacheKey) {
        let mut map = self.entries.write().unwrap_or_else(|e| e.into_inner());
        map.remove(&key.to_string());
    }

    /// Evict every project-scoped key for `name`. The global keys are left
    /// untouched.
    pub fn invalidate_project(&self, name: &str) {
        let mut map = self.entries.write().unwrap_or_else(|e| e.into_inner());
        for key in CacheKey::project_scoped(name) {
            map.remove(&key.to_string());
        }
    }

    pub fn clear(&self) {
        let mut map = self.entries.write().unwrap_or_else(|e| e.into_inner());
        map.clear();
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
