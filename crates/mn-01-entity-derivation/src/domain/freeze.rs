//! # Network Freeze Window
//!
//! Freeze transactions either carry an explicit start instant or, in the
//! deprecated form, hour/minute bounds relative to the UTC day on which the
//! transaction reached consensus.

use chrono::{DateTime, NaiveDate};
use shared_types::{FreezeBody, LegacyFreezeWindow};

/// Resolved freeze window, nanoseconds since epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreezeWindow {
    pub start_time: i64,
    pub end_time: Option<i64>,
}

/// Compute the freeze window of `body` at `consensus_timestamp`.
///
/// Returns `None` when the legacy hour/minute fields are out of range.
pub fn freeze_window(body: &FreezeBody, consensus_timestamp: i64) -> Option<FreezeWindow> {
    if let Some(start_time) = body.start_time {
        return Some(FreezeWindow {
            start_time,
            end_time: None,
        });
    }

    match body.legacy_window {
        Some(window) => legacy_window(&window, consensus_timestamp),
        None => Some(FreezeWindow {
            start_time: consensus_timestamp,
            end_time: None,
        }),
    }
}

fn legacy_window(window: &LegacyFreezeWindow, consensus_timestamp: i64) -> Option<FreezeWindow> {
    let day = DateTime::from_timestamp_nanos(consensus_timestamp).date_naive();
    let start_time = at(day, window.start_hour, window.start_min)?;

    let end_day = if (window.end_hour, window.end_min) < (window.start_hour, window.start_min) {
        day.succ_opt()?
    } else {
        day
    };
    let end_time = at(end_day, window.end_hour, window.end_min)?;

    Some(FreezeWindow {
        start_time,
        end_time: Some(end_time),
    })
}

fn at(day: NaiveDate, hour: u32, minute: u32) -> Option<i64> {
    day.and_hms_opt(hour, minute, 0)?.and_utc().timestamp_nanos_opt()
}
