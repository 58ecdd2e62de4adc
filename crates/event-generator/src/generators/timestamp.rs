//! Recent-timestamp generator.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use rand::Rng;

/// A whole-minute offset in `[0, lookback_minutes)` before `now`, returned as
/// naive UTC wall-clock time.
pub fn recent_timestamp<R: Rng>(
    rng: &mut R,
    now: DateTime<Utc>,
    lookback_minutes: u32,
) -> NaiveDateTime {
    let offset = rng.gen_range(0..lookback_minutes.max(1));
    (now - Duration::minutes(i64::from(offset))).naive_utc()
}
