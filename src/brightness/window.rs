//! Time windows that recur once per day.
//!
//! Both dimming windows (the fixed twilight hours and the solar night) are
//! resolved the same way: build the instance that starts yesterday and the one
//! that starts today, and keep whichever strictly contains "now". A window
//! whose end time is at or before its start time on the clock crosses
//! midnight and ends on the following day.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone};

/// A concrete `[start, end]` interval with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl TimeWindow {
    /// Returns `None` unless `start < end`.
    pub fn new(start: DateTime<Local>, end: DateTime<Local>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Strict containment: the boundaries themselves are outside.
    pub fn contains(&self, now: DateTime<Local>) -> bool {
        self.start < now && now < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn elapsed(&self, now: DateTime<Local>) -> Duration {
        now - self.start
    }

    /// Centered progress in `[-1, 1]`: 0 at the midpoint, negative before it.
    ///
    /// Computed as `(elapsed - remaining) / total` so that `start + d` and
    /// `end - d` map to exact negatives of each other.
    pub fn centered_progress(&self, now: DateTime<Local>) -> f64 {
        let total = self.duration().num_milliseconds();
        let elapsed = self.elapsed(now).num_milliseconds().clamp(0, total);
        let remaining = total - elapsed;
        (elapsed as f64 - remaining as f64) / total as f64
    }

    /// Pick the instance containing `now` among the ones starting yesterday
    /// and today.
    pub fn resolve<F>(now: DateTime<Local>, mut instance_for: F) -> Option<Self>
    where
        F: FnMut(NaiveDate) -> Option<TimeWindow>,
    {
        let today = now.date_naive();
        let yesterday = today.pred_opt()?;

        [yesterday, today]
            .into_iter()
            .filter_map(&mut instance_for)
            .find(|window| window.contains(now))
    }

    /// Resolve a window given as daily clock times.
    pub fn daily(start: NaiveTime, end: NaiveTime, now: DateTime<Local>) -> Option<Self> {
        Self::resolve(now, |day| daily_instance(day, start, end))
    }
}

/// The instance of a daily clock window that starts on `day`.
pub fn daily_instance(day: NaiveDate, start: NaiveTime, end: NaiveTime) -> Option<TimeWindow> {
    let end_day = if end <= start { day.succ_opt()? } else { day };
    TimeWindow::new(local_datetime(day, start)?, local_datetime(end_day, end)?)
}

/// Combine a local date and time.
///
/// Ambiguous times (DST fall-back) take the earlier instant; times skipped by
/// a DST spring-forward are moved one hour later.
pub fn local_datetime(day: NaiveDate, time: NaiveTime) -> Option<DateTime<Local>> {
    let naive = day.and_time(time);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| Local.from_local_datetime(&(naive + Duration::hours(1))).earliest())
}
