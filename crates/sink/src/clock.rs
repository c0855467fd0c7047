//! Record timestamps.
//!
//! Timestamps come from a process-wide function that tests may replace. A
//! sink can also carry its own clock, which takes precedence.

use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::{Arc, PoisonError, RwLock};

/// A function producing record timestamps.
pub type TimestampFn = Arc<dyn Fn() -> String + Send + Sync>;

static TIMESTAMP_FUNC: RwLock<Option<TimestampFn>> = RwLock::new(None);

/// Replace the process-wide timestamp function.
pub fn set_timestamp_func(func: impl Fn() -> String + Send + Sync + 'static) {
    let mut guard = TIMESTAMP_FUNC.write().unwrap_or_else(PoisonError::into_inner);
    *guard = Some(Arc::new(func));
}

/// Restore the default timestamp function.
pub fn reset_timestamp_func() {
    let mut guard = TIMESTAMP_FUNC.write().unwrap_or_else(PoisonError::into_inner);
    *guard = None;
}

/// The current timestamp from the process-wide function.
pub fn timestamp() -> String {
    let func = TIMESTAMP_FUNC
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    func.map_or_else(|| format_rfc3339_nano(Utc::now()), |func| func())
}

/// Format `time` as RFC3339 in UTC with up to nine fractional digits.
///
/// Trailing zeros of the fraction are dropped, and so is the fraction when
/// it is zero: `2024-01-02T03:04:05.1Z`, `2024-01-02T03:04:05Z`.
pub fn format_rfc3339_nano(time: DateTime<Utc>) -> String {
    let full = time.to_rfc3339_opts(SecondsFormat::Nanos, true);
    let Some((head, fraction)) = full.split_once('.') else {
        return full;
    };
    let digits = fraction.trim_end_matches('Z').trim_end_matches('0');
    if digits.is_empty() {
        format!("{head}Z")
    } else {
        format!("{head}.{digits}Z")
    }
}
