// Property-based tests for the month grid layout
// Random months, week starts and events; the grid shape must always hold

use chrono::{Datelike, Duration, Local, NaiveDate, TimeZone};
use dash_calendar::models::event::Event;
use dash_calendar::models::week_start::WeekStart;
use dash_calendar::services::month_grid::MonthGridBuilder;
use dash_calendar::utils::clock::FixedClock;
use dash_calendar::utils::date::{days_in_month, weekday_index};
use proptest::prelude::*;

fn week_start() -> impl Strategy<Value = WeekStart> {
    prop_oneof![Just(WeekStart::Sunday), Just(WeekStart::Monday)]
}

fn reference_date() -> impl Strategy<Value = NaiveDate> {
    (1990..2100i32, 1..=12u32, 1..=28u32)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn builder(today: NaiveDate) -> MonthGridBuilder<FixedClock> {
    let noon = Local
        .from_local_datetime(&today.and_hms_opt(12, 0, 0).unwrap())
        .earliest()
        .unwrap();
    MonthGridBuilder::with_clock(FixedClock(noon))
}

proptest! {
    /// Property: the grid always holds whole weeks, at most six of them
    #[test]
    fn prop_grid_is_whole_weeks(date in reference_date(), ws in week_start()) {
        let days = builder(date).build(date, ws, &[]);
        prop_assert_eq!(days.len() % 7, 0);
        prop_assert!(days.len() >= 28 && days.len() <= 42);
    }

    /// Property: the first cell falls on the configured week start
    #[test]
    fn prop_first_cell_on_week_start(date in reference_date(), ws in week_start()) {
        let days = builder(date).build(date, ws, &[]);
        prop_assert_eq!(weekday_index(days[0].date), ws.index());
    }

    /// Property: current-month cells are exactly the days of the month, in order
    #[test]
    fn prop_current_month_cells(date in reference_date(), ws in week_start()) {
        let days = builder(date).build(date, ws, &[]);
        let current: Vec<_> = days.iter().filter(|d| d.is_current_month()).collect();

        prop_assert_eq!(current.len() as u32, days_in_month(date));
        for (i, day) in current.iter().enumerate() {
            prop_assert_eq!(day.day_number, i as u32 + 1);
            prop_assert_eq!(day.date.month(), date.month());
        }
    }

    /// Property: cells are consecutive days, fillers only at the edges
    #[test]
    fn prop_cells_consecutive(date in reference_date(), ws in week_start()) {
        let days = builder(date).build(date, ws, &[]);
        for pair in days.windows(2) {
            prop_assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
            prop_assert!(!(pair[0].is_next_month && pair[1].is_current_month()));
            prop_assert!(!(pair[0].is_current_month() && pair[1].is_prev_month));
        }
    }

    /// Property: at most one cell is today, and it is the clock's date
    #[test]
    fn prop_single_today(
        date in reference_date(),
        ws in week_start(),
        shift in -40i64..40,
    ) {
        let today = date + Duration::days(shift);
        let days = builder(today).build(date, ws, &[]);
        let marked: Vec<_> = days.iter().filter(|d| d.is_today).collect();

        prop_assert!(marked.len() <= 1);
        let in_grid = days.iter().any(|d| d.date == today);
        prop_assert_eq!(marked.len() == 1, in_grid);
        if let Some(cell) = marked.first() {
            prop_assert_eq!(cell.date, today);
        }
    }

    /// Property: an event shows up in exactly the visible cells it overlaps
    #[test]
    fn prop_event_in_overlapping_cells(
        date in reference_date(),
        ws in week_start(),
        start_offset in -10i64..40,
        length_hours in 0i64..120,
    ) {
        let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap();
        let start = Local
            .from_local_datetime(&(first + Duration::days(start_offset)).and_hms_opt(9, 0, 0).unwrap())
            .earliest()
            .unwrap();
        let event = Event::new("Span", start, start + Duration::hours(length_hours)).unwrap();

        let days = builder(date).build(date, ws, std::slice::from_ref(&event));
        for day in &days {
            prop_assert_eq!(day.events.len() == 1, event.occurs_on(day.date));
        }
    }
}
