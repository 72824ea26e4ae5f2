// Test fixtures - reusable test data
// Provides a seeded event store shared by the integration tests

#![allow(dead_code)]

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use dash_calendar::models::calendar::Calendar;
use dash_calendar::models::event::Event;
use dash_calendar::services::calendar::CalendarService;
use dash_calendar::services::database::Database;
use dash_calendar::services::event::EventService;
use tempfile::TempDir;

/// Sample dates for testing
pub mod dates {
    use super::*;

    pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Monday March 10, 2025 at 08:00
    pub fn march_10_2025() -> DateTime<Local> {
        at(2025, 3, 10, 8, 0)
    }
}

/// File-backed database in a temporary directory, removed on drop.
pub struct TestStore {
    pub db: Database,
    _dir: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("events.db");
        let db = Database::new(path.to_str().unwrap()).expect("Failed to create database");
        db.initialize_schema().expect("Failed to initialize schema");
        Self { db, _dir: dir }
    }

    pub fn calendar(&self, calendar: Calendar) -> i64 {
        CalendarService::new(self.db.connection())
            .create(calendar)
            .unwrap()
            .id
            .unwrap()
    }

    pub fn event(&self, event: Event) -> Event {
        EventService::new(self.db.connection()).create(event).unwrap()
    }
}

/// Store with a home calendar, a subscribed holiday feed and a disabled
/// work calendar, plus a handful of March 2025 events.
pub fn seeded_store() -> TestStore {
    use dates::at;

    let store = TestStore::new();
    let home = store.calendar(Calendar {
        color: Some("#FF9500".to_string()),
        ..Calendar::new("Home")
    });
    let holidays = store.calendar(Calendar {
        is_subscribed: true,
        ..Calendar::new("Holidays")
    });
    let work = store.calendar(Calendar {
        enabled: false,
        ..Calendar::new("Work")
    });

    let home_event = |title: &str, start, end| {
        Event::builder()
            .title(title)
            .calendar_id(home)
            .start(start)
            .end(end)
            .build()
            .unwrap()
    };

    store.event(home_event("Dentist", at(2025, 3, 12, 9, 0), at(2025, 3, 12, 10, 0)));
    store.event(home_event("Trip", at(2025, 3, 30, 18, 0), at(2025, 4, 2, 9, 0)));
    store.event(home_event("Pay rent", at(2025, 3, 1, 0, 0), at(2025, 3, 1, 0, 0)));
    store.event(
        Event::builder()
            .title("Yoga")
            .calendar_id(home)
            .start(at(2025, 2, 24, 18, 0))
            .end(at(2025, 2, 24, 19, 0))
            .recurrence_rule("FREQ=WEEKLY")
            .build()
            .unwrap(),
    );
    store.event(
        Event::builder()
            .title("Public holiday")
            .calendar_id(holidays)
            .start(at(2025, 3, 11, 0, 0))
            .end(at(2025, 3, 11, 23, 59))
            .all_day(true)
            .build()
            .unwrap(),
    );
    store.event(
        Event::builder()
            .title("Standup")
            .calendar_id(work)
            .start(at(2025, 3, 10, 9, 0))
            .end(at(2025, 3, 10, 9, 15))
            .build()
            .unwrap(),
    );
    store.event(Event::new("Local note", at(2025, 3, 10, 12, 0), at(2025, 3, 10, 12, 30)).unwrap());

    store
}
