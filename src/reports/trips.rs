//! Delivery trip aggregation: bucket dockets by calendar day and keep a
//! running cumulative count.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::DeliveryDocket;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDay {
    /// Calendar day as `YYYY-MM-DD`.
    pub date: String,
    pub count: u32,
    pub cumulative: u32,
}

/// Parse a `"D/M/YYYY HH:MM:SS"` / `"M/D/YYYY HH:MM:SS"` timestamp into its
/// calendar day. The two layouts are disambiguated by the first component:
/// greater than 12 means day-first, otherwise month-first. Dates where both
/// day and month are <= 12 are inherently ambiguous in the source data; the
/// heuristic is lossy for those and that is a known data-quality limitation,
/// not something to correct here.
pub fn parse_ready_at(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().split_whitespace().next()?;
    let mut components = date_part.split('/');
    let first: u32 = components.next()?.trim().parse().ok()?;
    let second: u32 = components.next()?.trim().parse().ok()?;
    let year: i32 = components.next()?.trim().parse().ok()?;
    if components.next().is_some() {
        return None;
    }

    let (day, month) = if first > 12 {
        (first, second)
    } else {
        (second, first)
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Count deliveries per calendar day and accumulate across days sorted
/// ascending by date string. Dockets with unparseable timestamps are dropped
/// individually; they never fail the batch.
pub fn trip_report(dockets: &[DeliveryDocket]) -> Vec<TripDay> {
    let mut per_day: BTreeMap<String, u32> = BTreeMap::new();
    for docket in dockets {
        match parse_ready_at(&docket.ready_at) {
            Some(date) => {
                *per_day.entry(date.format("%Y-%m-%d").to_string()).or_insert(0) += 1;
            }
            None => {
                debug!(docket_id = %docket.docket_id, ready_at = %docket.ready_at,
                    "dropping docket with unparseable timestamp");
            }
        }
    }

    let mut cumulative = 0;
    per_day
        .into_iter()
        .map(|(date, count)| {
            cumulative += count;
            TripDay {
                date,
                count,
                cumulative,
            }
        })
        .collect()
}
