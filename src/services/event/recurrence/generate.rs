use chrono::{
    DateTime, Datelike, Days, Duration, Local, Months, NaiveDate, NaiveTime, TimeZone, Weekday,
};

use super::rule::{Frequency, RecurrenceRule};
use crate::models::event::Event;
use crate::utils::date::{first_of_month, last_of_month};

/// Collects occurrences of one event that overlap the requested range.
pub(super) struct Occurrences<'a> {
    event: &'a Event,
    rule: &'a RecurrenceRule,
    duration: Duration,
    range_start: DateTime<Local>,
    range_end: DateTime<Local>,
    produced: usize,
    found: Vec<Event>,
}

impl<'a> Occurrences<'a> {
    pub fn new(
        event: &'a Event,
        rule: &'a RecurrenceRule,
        range_start: DateTime<Local>,
        range_end: DateTime<Local>,
    ) -> Self {
        Self {
            event,
            rule,
            duration: event.duration(),
            range_start,
            range_end,
            produced: 0,
            found: Vec::new(),
        }
    }

    pub fn generate(mut self) -> Vec<Event> {
        match self.rule.frequency {
            Frequency::Daily => self.daily(),
            Frequency::Weekly => self.weekly(),
            Frequency::Monthly => self.monthly(),
            Frequency::Yearly => self.yearly(),
        }
        self.found
    }

    fn first_date(&self) -> NaiveDate {
        self.event.start.date_naive()
    }

    fn last_date(&self) -> NaiveDate {
        self.range_end.date_naive()
    }

    /// Consider a candidate start. Returns false once later candidates
    /// cannot produce anything (COUNT reached, past UNTIL or the range).
    fn offer(&mut self, date: NaiveDate) -> bool {
        if let Some(max) = self.rule.count {
            if self.produced >= max {
                return false;
            }
        }
        if let Some(until) = self.rule.until {
            if date > until {
                return false;
            }
        }

        let Some(start) = at_time(date, self.event.start.time()) else {
            return true;
        };
        if start > self.range_end {
            return false;
        }
        if start < self.event.start {
            return true;
        }

        // EXDATE removes occurrences from the COUNT-limited set
        self.produced += 1;
        if self.is_exception(date) {
            return true;
        }

        let Some(end) = start.checked_add_signed(self.duration) else {
            return false;
        };
        if end >= self.range_start {
            let mut occurrence = self.event.clone();
            occurrence.start = start;
            occurrence.end = end;
            self.found.push(occurrence);
        }
        true
    }

    fn is_exception(&self, date: NaiveDate) -> bool {
        self.event
            .recurrence_exceptions
            .as_ref()
            .map(|exceptions| exceptions.iter().any(|ex| ex.date_naive() == date))
            .unwrap_or(false)
    }

    /// INTERVAL as a day/month/year step; the rule keeps it in `1..=MAX_INTERVAL`.
    fn step(&self) -> u32 {
        u32::try_from(self.rule.interval).unwrap_or(1)
    }

    fn daily(&mut self) {
        let step = Days::new(self.step() as u64);
        let mut date = self.first_date();
        while date <= self.last_date() && self.offer(date) {
            match date.checked_add_days(step) {
                Some(next) => date = next,
                None => return,
            }
        }
    }

    fn weekly(&mut self) {
        let first = self.first_date();
        let days = if self.rule.by_day.is_empty() {
            vec![first.weekday()]
        } else {
            self.rule.by_day.clone()
        };

        let step = Days::new(7 * self.step() as u64);
        let Some(mut week) =
            first.checked_sub_days(Days::new(first.weekday().num_days_from_monday() as u64))
        else {
            return;
        };
        while week <= self.last_date() {
            for day in &days {
                let Some(date) =
                    week.checked_add_days(Days::new(day.num_days_from_monday() as u64))
                else {
                    return;
                };
                if date < first {
                    continue;
                }
                if !self.offer(date) {
                    return;
                }
            }
            match week.checked_add_days(step) {
                Some(next) => week = next,
                None => return,
            }
        }
    }

    fn monthly(&mut self) {
        let first = self.first_date();
        let base = first_of_month(first);
        let mut step = 0u32;

        loop {
            let Some(month) = base.checked_add_months(Months::new(step)) else {
                return;
            };
            if month > self.last_date() {
                return;
            }

            let date = match (self.rule.by_month_day, self.rule.positional_day) {
                (Some(-1), _) => Some(last_of_month(month)),
                (Some(day), _) if day > 0 => month.with_day(day as u32),
                (Some(_), _) => None,
                (None, Some((position, weekday))) => nth_weekday(month, position, weekday),
                (None, None) => month.with_day(first.day()),
            };

            if let Some(date) = date {
                if date >= first && !self.offer(date) {
                    return;
                }
            }

            match step.checked_add(self.step()) {
                Some(next) => step = next,
                None => return,
            }
        }
    }

    fn yearly(&mut self) {
        let first = self.first_date();
        let mut year = first.year();

        while year <= self.range_end.year() {
            // Feb 29 only recurs in leap years
            if let Some(date) = first.with_year(year) {
                if !self.offer(date) {
                    return;
                }
            }
            match year.checked_add(self.step() as i32) {
                Some(next) => year = next,
                None => return,
            }
        }
    }
}

fn at_time(date: NaiveDate, time: NaiveTime) -> Option<DateTime<Local>> {
    Local.from_local_datetime(&date.and_time(time)).earliest()
}

/// The `position`-th `weekday` of the month (negative counts from the end).
fn nth_weekday(month: NaiveDate, position: i32, weekday: Weekday) -> Option<NaiveDate> {
    let candidate = if position > 0 {
        let first = first_of_month(month);
        let offset = (weekday.num_days_from_monday() + 7
            - first.weekday().num_days_from_monday())
            % 7;
        first.checked_add_days(Days::new(offset as u64 + 7 * (position as u64 - 1)))?
    } else if position < 0 {
        let last = last_of_month(month);
        let offset = (last.weekday().num_days_from_monday() + 7
            - weekday.num_days_from_monday())
            % 7;
        last.checked_sub_days(Days::new(offset as u64 + 7 * (position.unsigned_abs() as u64 - 1)))?
    } else {
        return None;
    };

    (candidate.month() == month.month()).then_some(candidate)
}
