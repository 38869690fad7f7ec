//! `$NOW` relative date expansion

use chrono::{DateTime, FixedOffset, Months, TimeDelta};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// ISO-8601 with a numeric offset, e.g. `2024-05-01T09:30:00+02:00`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

static NOW_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$NOW([-+][0-9]+)?([ywdhms])?").expect("valid $NOW pattern"));

/// Replace the first `$NOW[+-N][unit]` in `value` with `now` shifted by the
/// offset. The unit defaults to minutes.
pub fn expand_now(value: &str, now: DateTime<FixedOffset>) -> String {
    NOW_PATTERN
        .replacen(value, 1, |caps: &Captures| {
            let unit = caps.get(2).map_or("m", |unit| unit.as_str());

            let date = match caps.get(1) {
                Some(change) => shift(now, change.as_str(), unit).unwrap_or_else(|| {
                    tracing::warn!("Ignoring out of range offset {}{}", change.as_str(), unit);
                    now
                }),
                None => now,
            };

            date.format(TIMESTAMP_FORMAT).to_string()
        })
        .into_owned()
}

fn shift(now: DateTime<FixedOffset>, change: &str, unit: &str) -> Option<DateTime<FixedOffset>> {
    let amount: i64 = change.parse().ok()?;

    match unit {
        "y" => shift_months(now, amount.checked_mul(12)?),
        "w" => now.checked_add_signed(TimeDelta::try_weeks(amount)?),
        "d" => now.checked_add_signed(TimeDelta::try_days(amount)?),
        "h" => now.checked_add_signed(TimeDelta::try_hours(amount)?),
        "m" => now.checked_add_signed(TimeDelta::try_minutes(amount)?),
        "s" => now.checked_add_signed(TimeDelta::try_seconds(amount)?),
        _ => None,
    }
}

fn shift_months(now: DateTime<FixedOffset>, months: i64) -> Option<DateTime<FixedOffset>> {
    let count = Months::new(u32::try_from(months.unsigned_abs()).ok()?);

    if months >= 0 {
        now.checked_add_months(count)
    } else {
        now.checked_sub_months(count)
    }
}
