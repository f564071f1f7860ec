//! Weekly launch window (Sunday 00:00 to Saturday 23:59:59.999) and the
//! countdown to the next one, in a fixed UTC offset.

use crate::domain::model::Countdown;
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveTime, TimeZone, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl WeekWindow {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }

    /// Start of the following week.
    pub fn next_start(&self) -> DateTime<Utc> {
        self.start + Duration::days(7)
    }
}

pub fn week_window(now: DateTime<Utc>, offset: FixedOffset) -> WeekWindow {
    let local = now.with_timezone(&offset);
    let since_sunday = i64::from(local.weekday().num_days_from_sunday());
    let sunday = local.date_naive() - Duration::days(since_sunday);
    let start_local = sunday.and_time(NaiveTime::MIN);
    let start = Utc.from_utc_datetime(&(start_local - Duration::seconds(i64::from(offset.local_minus_utc()))));

    WeekWindow {
        start,
        end: start + Duration::days(7) - Duration::milliseconds(1),
    }
}

pub fn countdown_to_next_week(now: DateTime<Utc>, offset: FixedOffset) -> Countdown {
    let remaining = (week_window(now, offset).next_start() - now).max(Duration::zero());
    let seconds = remaining.num_seconds();

    Countdown {
        days: seconds / 86_400,
        hours: (seconds / 3_600) % 24,
        minutes: (seconds / 60) % 60,
        seconds: seconds % 60,
    }
}
