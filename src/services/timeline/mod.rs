//! Refresh timeline for the widget.
//!
//! A timeline is a short list of entries, each the moment a snapshot should
//! be shown. Once the last entry is reached a fresh timeline is requested.

use chrono::{DateTime, Duration, Local};
use serde::Serialize;

use crate::models::week_start::WeekStart;
use crate::utils::clock::Clock;

pub const DEFAULT_ENTRY_COUNT: usize = 5;

pub fn default_step() -> Duration {
    Duration::minutes(1)
}

/// One point on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelineEntry {
    pub date: DateTime<Local>,
    pub week_start: WeekStart,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub entries: Vec<TimelineEntry>,
    /// When to ask for the next timeline (the last entry's date)
    pub reload_at: DateTime<Local>,
}

pub struct TimelineProvider<C> {
    clock: C,
    week_start: WeekStart,
}

impl<C: Clock> TimelineProvider<C> {
    pub fn new(clock: C, week_start: WeekStart) -> Self {
        Self { clock, week_start }
    }

    /// Entry shown before real data is available.
    pub fn placeholder(&self) -> TimelineEntry {
        self.entry_at(self.clock.now())
    }

    /// Entry for a one-off preview.
    pub fn snapshot(&self) -> TimelineEntry {
        self.entry_at(self.clock.now())
    }

    /// `count` entries `step` apart, starting now. Entries that would fall
    /// past the representable range are dropped.
    pub fn timeline(&self, count: usize, step: Duration) -> Timeline {
        let now = self.clock.now();
        let entries: Vec<TimelineEntry> =
            std::iter::successors(Some(now), |date| date.checked_add_signed(step))
                .take(count)
                .map(|date| self.entry_at(date))
                .collect();
        let reload_at = entries.last().map(|entry| entry.date).unwrap_or(now);

        log::debug!(
            "Generated timeline with {} entries, reload at {}",
            entries.len(),
            reload_at
        );
        Timeline { entries, reload_at }
    }

    fn entry_at(&self, date: DateTime<Local>) -> TimelineEntry {
        TimelineEntry {
            date,
            week_start: self.week_start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::clock::FixedClock;
    use chrono::TimeZone;

    fn provider() -> (TimelineProvider<FixedClock>, DateTime<Local>) {
        let now = Local.with_ymd_and_hms(2024, 12, 7, 8, 30, 0).unwrap();
        (TimelineProvider::new(FixedClock(now), WeekStart::Monday), now)
    }

    #[test]
    fn test_placeholder_and_snapshot_use_now() {
        let (provider, now) = provider();
        assert_eq!(provider.placeholder().date, now);
        assert_eq!(provider.snapshot().date, now);
        assert_eq!(provider.snapshot().week_start, WeekStart::Monday);
    }

    #[test]
    fn test_default_timeline() {
        let (provider, now) = provider();
        let timeline = provider.timeline(DEFAULT_ENTRY_COUNT, default_step());

        let dates: Vec<_> = timeline.entries.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            (0..5).map(|i| now + Duration::minutes(i)).collect::<Vec<_>>()
        );
        assert_eq!(timeline.reload_at, now + Duration::minutes(4));
    }

    #[test]
    fn test_oversized_step_stops_instead_of_overflowing() {
        let (provider, now) = provider();
        let timeline = provider.timeline(3, Duration::days(100_000_000));
        assert_eq!(timeline.entries.len(), 1);
        assert_eq!(timeline.reload_at, now);
    }

    #[test]
    fn test_empty_timeline_reloads_now() {
        let (provider, now) = provider();
        let timeline = provider.timeline(0, default_step());
        assert!(timeline.entries.is_empty());
        assert_eq!(timeline.reload_at, now);
    }
}
