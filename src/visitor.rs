//! Cosmetic page-load counter.
//!
//! Not analytics: the first load in a browser is seeded with a random
//! baseline, every later load (repeat visits included) adds one. Two tabs
//! loading at the same moment can both read the same value and under-count.

use crate::{logging::EventLog, storage::PreferenceStore};
use serde_json::json;

/// Picks a seed in `[min, max)` from a uniform sample in `[0, 1)`.
pub fn seed_baseline(range: (u64, u64), unit_sample: f64) -> u64 {
    let (min, max) = range;
    if max <= min {
        return min;
    }

    let span = max - min;
    let offset = (unit_sample.clamp(0.0, 1.0) * span as f64).floor() as u64;
    min + offset.min(span - 1)
}

/// Reads, bumps, and writes back the count for this page load.
///
/// A missing or unparseable stored value is reseeded. A failed write is
/// logged; the returned number is still shown for this session.
pub fn record_visit(
    store: &dyn PreferenceStore,
    key: &str,
    baseline: (u64, u64),
    random: impl FnOnce() -> f64,
    log: EventLog,
) -> u64 {
    let stored = store.get(key);
    let previous = stored.as_deref().and_then(|value| value.trim().parse::<u64>().ok());

    let count = match previous {
        Some(previous) => {
            let count = previous.saturating_add(1);
            log.debug("visitor_count_incremented", json!({ "count": count }));
            count
        }
        None => {
            if stored.is_some() {
                log.warn("visitor_count_malformed", json!({ "key": key }));
            }
            let count = seed_baseline(baseline, random());
            log.info("visitor_count_seeded", json!({ "count": count }));
            count
        }
    };

    if let Err(error) = store.set(key, &count.to_string()) {
        log.warn(
            "storage_write_failed",
            json!({ "key": key, "error": error.to_string() }),
        );
    }

    count
}
