//! Widget composition.
//!
//! Combines the month grid, today's panel and the next upcoming event into
//! one snapshot for a timeline entry. Event source failures never fail the
//! widget; they only leave it without events.

use chrono::{DateTime, Duration, Local};
use serde::Serialize;

use crate::models::appearance::Appearance;
use crate::models::day_cell::DayCell;
use crate::models::event::Event;
use crate::models::week_start::WeekStart;
use crate::services::event_source::EventSource;
use crate::services::month_grid::{grid_bounds, weekday_headers, MonthGridBuilder};
use crate::services::timeline::TimelineEntry;
use crate::utils::clock::Clock;
use crate::utils::date::{relative_day_label, start_of_day};

pub const DEFAULT_UPCOMING_WINDOW_DAYS: i64 = 7;

/// The first event of the upcoming window with its day label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextEvent {
    pub event: Event,
    /// "Today", "Tomorrow" or e.g. "Fri 17"
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetSnapshot {
    pub entry_date: DateTime<Local>,
    pub week_start: WeekStart,
    pub headers: Vec<String>,
    pub days: Vec<DayCell>,
    pub today: DayCell,
    pub next_event: Option<NextEvent>,
}

impl WidgetSnapshot {
    /// Grid cells grouped into week rows.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.days.chunks(7)
    }
}

pub struct WidgetService<S, C> {
    source: S,
    clock: C,
    appearance: Appearance,
    upcoming_window: Duration,
}

impl<S: EventSource, C: Clock> WidgetService<S, C> {
    pub fn new(source: S, clock: C, appearance: Appearance) -> Self {
        Self {
            source,
            clock,
            appearance,
            upcoming_window: Duration::days(DEFAULT_UPCOMING_WINDOW_DAYS),
        }
    }

    pub fn with_upcoming_window_days(mut self, days: i64) -> Self {
        self.upcoming_window = Duration::days(days);
        self
    }

    pub fn snapshot(&self, entry: &TimelineEntry) -> WidgetSnapshot {
        let builder = MonthGridBuilder::with_clock(&self.clock);
        let reference = entry.date.date_naive();

        let (first, last) = grid_bounds(reference, entry.week_start);
        let grid_events = self.fetch(start_of_day(first), start_of_day(last) + Duration::days(1));
        let days = builder.build(reference, entry.week_start, &grid_events);

        let today = days
            .iter()
            .find(|day| day.is_today)
            .cloned()
            .unwrap_or_else(|| builder.day(self.clock.today(), &[]));

        WidgetSnapshot {
            entry_date: entry.date,
            week_start: entry.week_start,
            headers: weekday_headers(entry.week_start),
            days,
            today,
            next_event: self.next_event(),
        }
    }

    /// First event, by start, overlapping `[now, now + window]`.
    pub fn next_event(&self) -> Option<NextEvent> {
        let now = self.clock.now();
        let mut upcoming = self.fetch(now, now + self.upcoming_window);
        upcoming.sort_by_key(|event| event.start);

        upcoming.into_iter().next().map(|event| NextEvent {
            label: relative_day_label(event.start, now, &self.appearance),
            event,
        })
    }

    fn fetch(&self, start: DateTime<Local>, end: DateTime<Local>) -> Vec<Event> {
        match self.source.events_in_range(start, end) {
            Ok(events) => events,
            Err(e) => {
                log::warn!("Failed to load events for widget: {:#}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::access::AccessStatus;
    use crate::services::event_source::{GatedEventSource, MockEventSource};
    use crate::utils::clock::FixedClock;
    use chrono::{NaiveDate, TimeZone};

    fn at(m: u32, d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, m, d, h, 0, 0).unwrap()
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn entry(date: DateTime<Local>) -> TimelineEntry {
        TimelineEntry {
            date,
            week_start: WeekStart::Monday,
        }
    }

    fn catalogue() -> Vec<Event> {
        vec![
            Event::new("Trip", at(3, 30, 18), at(4, 2, 9)).unwrap(),
            Event::new("Dentist", at(3, 12, 9), at(3, 12, 10)).unwrap(),
            Event::new("Party", at(4, 5, 20), at(4, 5, 23)).unwrap(),
        ]
    }

    /// Mock that answers range queries from a fixed catalogue.
    fn catalogue_source() -> MockEventSource {
        let mut source = MockEventSource::new();
        source.expect_events_in_range().returning(|start, end| {
            Ok(catalogue()
                .into_iter()
                .filter(|e| e.start <= end && e.end >= start)
                .collect())
        });
        source
    }

    #[test]
    fn test_snapshot_builds_grid_with_filler_events() {
        let clock = FixedClock(at(3, 10, 8));
        let widget = WidgetService::new(catalogue_source(), clock, Appearance::default());

        let snapshot = widget.snapshot(&entry(at(3, 10, 8)));

        assert_eq!(snapshot.days.len(), 42);
        assert_eq!(snapshot.headers[0], "M");
        assert_eq!(snapshot.weeks().count(), 6);
        let party_day = snapshot.days.iter().find(|d| d.date == date(4, 5)).unwrap();
        assert!(party_day.is_next_month);
        assert_eq!(party_day.events.len(), 1);
    }

    #[test]
    fn test_today_panel_and_next_event() {
        let clock = FixedClock(at(3, 10, 8));
        let widget = WidgetService::new(catalogue_source(), clock, Appearance::default());

        let snapshot = widget.snapshot(&entry(at(3, 10, 8)));

        assert_eq!(snapshot.today.date, date(3, 10));
        assert!(snapshot.today.is_today);
        let next = snapshot.next_event.unwrap();
        assert_eq!(next.event.title, "Dentist");
        assert_eq!(next.label, "Wed 12");
    }

    #[test]
    fn test_next_event_tomorrow_label() {
        let clock = FixedClock(at(3, 11, 18));
        let widget = WidgetService::new(catalogue_source(), clock, Appearance::default());
        assert_eq!(widget.next_event().unwrap().label, "Tomorrow");
    }

    #[test]
    fn test_next_event_outside_window() {
        let clock = FixedClock(at(3, 13, 8));
        let widget = WidgetService::new(catalogue_source(), clock, Appearance::default())
            .with_upcoming_window_days(3);
        assert!(widget.next_event().is_none());
    }

    #[test]
    fn test_today_outside_grid_gets_standalone_cell() {
        let clock = FixedClock(at(6, 1, 8));
        let widget = WidgetService::new(catalogue_source(), clock, Appearance::default());

        let snapshot = widget.snapshot(&entry(at(3, 10, 8)));

        assert!(snapshot.days.iter().all(|d| !d.is_today));
        assert_eq!(snapshot.today.date, date(6, 1));
        assert!(snapshot.today.events.is_empty());
    }

    #[test]
    fn test_source_error_degrades_to_empty() {
        let mut source = MockEventSource::new();
        source
            .expect_events_in_range()
            .returning(|_, _| Err(anyhow::anyhow!("store offline")));
        let widget = WidgetService::new(source, FixedClock(at(3, 10, 8)), Appearance::default());

        let snapshot = widget.snapshot(&entry(at(3, 10, 8)));
        assert!(snapshot.days.iter().all(|d| d.events.is_empty()));
        assert!(snapshot.next_event.is_none());
    }

    #[test]
    fn test_denied_access_shows_placeholder_grid() {
        let gated = GatedEventSource::new(catalogue_source(), AccessStatus::Denied);
        let widget = WidgetService::new(gated, FixedClock(at(3, 10, 8)), Appearance::default());

        let snapshot = widget.snapshot(&entry(at(3, 10, 8)));
        assert_eq!(snapshot.days.len(), 42);
        assert!(snapshot.days.iter().all(|d| d.events.is_empty()));
        assert!(snapshot.next_event.is_none());
    }
}
