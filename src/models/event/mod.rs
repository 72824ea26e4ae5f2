// Event module
// Calendar event as read from the local event store

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::calendar::is_hex_color;

/// Calendar event with an inclusive `[start, end]` span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Option<i64>,
    pub calendar_id: Option<i64>,
    pub title: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub all_day: bool,
    pub color: Option<String>,
    pub recurrence_rule: Option<String>, // RRULE string (RFC 5545)
    pub recurrence_exceptions: Option<Vec<DateTime<Local>>>, // Exception dates
}

impl Event {
    /// Create a new event with required fields
    ///
    /// # Arguments
    /// * `title` - Event title (required, non-empty)
    /// * `start` - Event start time
    /// * `end` - Event end time, equal to `start` for a point-in-time event
    ///
    /// # Examples
    /// ```
    /// use dash_calendar::models::event::Event;
    /// use chrono::Local;
    ///
    /// let start = Local::now();
    /// let end = start + chrono::Duration::hours(1);
    /// let event = Event::new("Team Meeting", start, end).unwrap();
    /// assert!(event.occurs_on(start.date_naive()));
    /// ```
    pub fn new(
        title: impl Into<String>,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Self, String> {
        let event = Self {
            id: None,
            calendar_id: None,
            title: title.into(),
            start,
            end,
            all_day: false,
            color: None,
            recurrence_rule: None,
            recurrence_exceptions: None,
        };

        event.validate()?;
        Ok(event)
    }

    /// Create a builder for constructing events with optional fields
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Event title cannot be empty".to_string());
        }

        if self.end < self.start {
            return Err("Event end time cannot be before start time".to_string());
        }

        if let Some(ref color) = self.color {
            if !is_hex_color(color) {
                return Err("Color must be in hex format (#RRGGBB or #RGB)".to_string());
            }
        }

        Ok(())
    }

    /// Whether the event's span touches any instant of the given local day.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.start.date_naive() <= date && date <= self.end.date_naive()
    }

    /// Check if this is a recurring event
    pub fn is_recurring(&self) -> bool {
        self.recurrence_rule
            .as_deref()
            .map(|rule| !rule.is_empty() && rule != "None")
            .unwrap_or(false)
    }

    /// Get the duration of the event
    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

/// Builder for creating events with optional fields
#[derive(Default)]
pub struct EventBuilder {
    title: Option<String>,
    calendar_id: Option<i64>,
    start: Option<DateTime<Local>>,
    end: Option<DateTime<Local>>,
    all_day: bool,
    color: Option<String>,
    recurrence_rule: Option<String>,
    recurrence_exceptions: Option<Vec<DateTime<Local>>>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn calendar_id(mut self, calendar_id: i64) -> Self {
        self.calendar_id = Some(calendar_id);
        self
    }

    pub fn start(mut self, start: DateTime<Local>) -> Self {
        self.start = Some(start);
        self
    }

    /// Set the end time. Defaults to the start time when omitted.
    pub fn end(mut self, end: DateTime<Local>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    /// Set the event color (hex format)
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the recurrence rule (RRULE format)
    pub fn recurrence_rule(mut self, rule: impl Into<String>) -> Self {
        self.recurrence_rule = Some(rule.into());
        self
    }

    pub fn recurrence_exceptions(mut self, exceptions: Vec<DateTime<Local>>) -> Self {
        self.recurrence_exceptions = Some(exceptions);
        self
    }

    pub fn build(self) -> Result<Event, String> {
        let title = self.title.ok_or("Event title is required")?;
        let start = self.start.ok_or("Event start time is required")?;
        let end = self.end.unwrap_or(start);

        let event = Event {
            id: None,
            calendar_id: self.calendar_id,
            title,
            start,
            end,
            all_day: self.all_day,
            color: self.color,
            recurrence_rule: self.recurrence_rule,
            recurrence_exceptions: self.recurrence_exceptions,
        };

        event.validate()?;
        Ok(event)
    }
}
