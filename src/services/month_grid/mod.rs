//! Month grid layout.
//!
//! Builds the day cells of a month view: the full reference month plus the
//! leading and trailing days from neighbouring months needed to fill whole
//! weeks, each cell carrying the events that overlap it.

use chrono::{Days, NaiveDate};

use crate::models::day_cell::DayCell;
use crate::models::event::Event;
use crate::models::week_start::WeekStart;
use crate::utils::clock::{Clock, SystemClock};
use crate::utils::date::{days_in_month, first_of_month, weekday_index};

/// Number of columns in every grid row.
pub const DAYS_PER_WEEK: usize = 7;

/// Lays out month grids. "Today" is taken from the clock.
#[derive(Debug, Clone, Default)]
pub struct MonthGridBuilder<C = SystemClock> {
    clock: C,
}

impl MonthGridBuilder<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> MonthGridBuilder<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Build the cells for the month containing `reference_date`.
    ///
    /// The result always holds whole weeks, starts on `week_start` and is in
    /// ascending date order. Each event is attached to every cell whose day
    /// it overlaps. Filler days that fall outside chrono's date range (the
    /// first and last months of `NaiveDate`) are left out.
    pub fn build(
        &self,
        reference_date: NaiveDate,
        week_start: WeekStart,
        events: &[Event],
    ) -> Vec<DayCell> {
        let first = first_of_month(reference_date);
        let day_count = days_in_month(reference_date) as u64;
        let weekday_offset = leading_days(first, week_start);

        let today = self.clock.today();
        let index = EventIndex::new(events);
        let cell = |date: NaiveDate| DayCell::new(date, index.on(date), date == today);

        let mut days = Vec::with_capacity(DAYS_PER_WEEK * 6);

        // Previous month, ending with the day right before the 1st
        for back in (1..=weekday_offset as u64).rev() {
            if let Some(date) = first.checked_sub_days(Days::new(back)) {
                days.push(cell(date).prev_month());
            }
        }

        let month_days = first.iter_days().take(day_count as usize);
        days.extend(month_days.map(&cell));
        let last = days.last().map(|day| day.date).unwrap_or(first);

        let emitted = weekday_offset as usize + day_count as usize;
        let remainder = (DAYS_PER_WEEK - emitted % DAYS_PER_WEEK) % DAYS_PER_WEEK;
        days.extend(
            last.iter_days()
                .skip(1)
                .take(remainder)
                .map(|date| cell(date).next_month()),
        );

        log::debug!(
            "Built month grid for {}: {} leading, {} days, {} trailing",
            first.format("%Y-%m"),
            weekday_offset,
            day_count,
            remainder
        );

        days
    }

    /// Cell for a single day outside of any grid.
    pub fn day(&self, date: NaiveDate, events: &[Event]) -> DayCell {
        DayCell::new(
            date,
            EventIndex::new(events).on(date),
            date == self.clock.today(),
        )
    }
}

/// Number of previous-month days shown before the 1st.
fn leading_days(first: NaiveDate, week_start: WeekStart) -> u32 {
    (weekday_index(first) + 7 - week_start.index()) % 7
}

/// First and last date shown by the grid for the month of `reference_date`.
pub fn grid_bounds(reference_date: NaiveDate, week_start: WeekStart) -> (NaiveDate, NaiveDate) {
    let first = first_of_month(reference_date);
    let leading = leading_days(first, week_start) as usize;
    let day_count = days_in_month(reference_date) as usize;
    let trailing = (DAYS_PER_WEEK - (leading + day_count) % DAYS_PER_WEEK) % DAYS_PER_WEEK;

    (
        first
            .checked_sub_days(Days::new(leading as u64))
            .unwrap_or(NaiveDate::MIN),
        first
            .checked_add_days(Days::new((day_count + trailing) as u64 - 1))
            .unwrap_or(NaiveDate::MAX),
    )
}

/// Single-letter weekday headers in grid column order.
pub fn weekday_headers(week_start: WeekStart) -> Vec<String> {
    const INITIALS: [&str; DAYS_PER_WEEK] = ["S", "M", "T", "W", "T", "F", "S"];
    let start = week_start.to_chrono().num_days_from_sunday() as usize;
    (0..DAYS_PER_WEEK)
        .map(|i| INITIALS[(start + i) % DAYS_PER_WEEK].to_string())
        .collect()
}

/// Events sorted by start so each day only scans those already started.
struct EventIndex<'a> {
    by_start: Vec<&'a Event>,
}

impl<'a> EventIndex<'a> {
    fn new(events: &'a [Event]) -> Self {
        let mut by_start: Vec<&Event> = events.iter().collect();
        by_start.sort_by_key(|event| event.start);
        Self { by_start }
    }

    fn on(&self, date: NaiveDate) -> Vec<Event> {
        let started = self
            .by_start
            .partition_point(|event| event.start.date_naive() <= date);

        self.by_start[..started]
            .iter()
            .filter(|event| event.occurs_on(date))
            .map(|event| (*event).clone())
            .collect()
    }
}
