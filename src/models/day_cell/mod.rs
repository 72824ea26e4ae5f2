use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::event::Event;

/// One square of the month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day_number: u32,
    pub is_prev_month: bool,
    pub is_next_month: bool,
    pub is_today: bool,
    /// Events overlapping this day, ordered by start time
    pub events: Vec<Event>,
    /// Color of the first event, used to tint the day number
    pub accent: Option<String>,
}

impl DayCell {
    pub fn new(date: NaiveDate, events: Vec<Event>, is_today: bool) -> Self {
        let accent = events.first().and_then(|event| event.color.clone());
        Self {
            date,
            day_number: date.day(),
            is_prev_month: false,
            is_next_month: false,
            is_today,
            events,
            accent,
        }
    }

    pub fn prev_month(mut self) -> Self {
        self.is_prev_month = true;
        self
    }

    pub fn next_month(mut self) -> Self {
        self.is_next_month = true;
        self
    }

    pub fn is_current_month(&self) -> bool {
        !self.is_prev_month && !self.is_next_month
    }

    /// Filler days from neighbouring months are drawn faded.
    pub fn is_faded(&self) -> bool {
        !self.is_current_month()
    }

    pub fn accent_color(&self) -> Option<&str> {
        self.accent.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_new_cell_is_current_month() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let cell = DayCell::new(date, Vec::new(), false);
        assert_eq!(cell.day_number, 9);
        assert!(cell.is_current_month());
        assert!(!cell.is_faded());
    }

    #[test]
    fn test_filler_cells_are_faded() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        assert!(DayCell::new(date, Vec::new(), false).prev_month().is_faded());
        assert!(DayCell::new(date, Vec::new(), false).next_month().is_faded());
    }

    #[test]
    fn test_accent_color_from_first_event() {
        let start = Local.with_ymd_and_hms(2025, 3, 9, 10, 0, 0).unwrap();
        let event = Event::builder()
            .title("Gym")
            .start(start)
            .color("#00AA00")
            .build()
            .unwrap();
        let cell = DayCell::new(start.date_naive(), vec![event], false);
        assert_eq!(cell.accent_color(), Some("#00AA00"));

        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json["accent"], "#00AA00");
    }

    #[test]
    fn test_uncolored_first_event_leaves_no_accent() {
        let start = Local.with_ymd_and_hms(2025, 3, 9, 10, 0, 0).unwrap();
        let plain = Event::new("Note", start, start).unwrap();
        let colored = Event::builder()
            .title("Gym")
            .start(start)
            .color("#00AA00")
            .build()
            .unwrap();
        let cell = DayCell::new(start.date_naive(), vec![plain, colored], false);
        assert_eq!(cell.accent_color(), None);
    }
}
