use super::EventService;
use crate::models::event::Event;
use anyhow::Result;
use chrono::{DateTime, Local};

mod generate;
mod rule;

use generate::Occurrences;
use rule::RecurrenceRule;

impl<'a> EventService<'a> {
    /// Expand recurring events into individual occurrences within the date range.
    /// Non-recurring events are returned as-is. The result is sorted by start.
    pub fn expand_recurring_events(
        &self,
        start: DateTime<Local>,
        end: DateTime<Local>,
        calendar_ids: Option<&[i64]>,
    ) -> Result<Vec<Event>> {
        let base_events = self.find_by_date_range(start, end, calendar_ids)?;
        let mut expanded_events = Vec::with_capacity(base_events.len());

        for event in base_events {
            if event.is_recurring() {
                expanded_events.extend(expand_occurrences(&event, start, end));
            } else {
                expanded_events.push(event);
            }
        }

        expanded_events.sort_by(|a, b| a.start.cmp(&b.start));
        log::debug!(
            "Expanded {} events between {} and {}",
            expanded_events.len(),
            start,
            end
        );
        Ok(expanded_events)
    }
}

/// Occurrences of a recurring event whose span overlaps `[range_start, range_end]`.
pub fn expand_occurrences(
    event: &Event,
    range_start: DateTime<Local>,
    range_end: DateTime<Local>,
) -> Vec<Event> {
    let Some(ref rrule) = event.recurrence_rule else {
        return Vec::new();
    };

    let rule = RecurrenceRule::parse(rrule);
    Occurrences::new(event, &rule, range_start, range_end).generate()
}
