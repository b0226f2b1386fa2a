use chrono::{DateTime, Utc};

use crate::record::HeroineRecord;

/// One rotation period: 7 days in milliseconds.
pub const WEEK_MILLIS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Number of whole 7-day periods elapsed since the Unix epoch. Not aligned
/// to calendar weeks; the value advances once every 168 hours, the same for
/// every visitor inside a period.
pub fn week_number(now: DateTime<Utc>) -> i64 {
    now.timestamp_millis().div_euclid(WEEK_MILLIS)
}

/// Index of the featured record for a given epoch week. `None` on an empty
/// dataset so the modulo can never divide by zero.
pub fn featured_index(week: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(week.rem_euclid(len as i64) as usize)
}

pub fn featured(records: &[HeroineRecord], now: DateTime<Utc>) -> Option<&HeroineRecord> {
    let index = featured_index(week_number(now), records.len())?;
    Some(&records[index])
}
