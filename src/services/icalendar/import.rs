use anyhow::Result;
use chrono::{DateTime, Local};

use super::utils::{
    inclusive_all_day_end, normalize_color, parse_instant, unescape_text, unfold_lines,
};
use crate::models::event::Event;

/// Events read from one VCALENDAR document.
#[derive(Debug, Default)]
pub struct ParsedCalendar {
    pub events: Vec<Event>,
    /// VEVENT blocks dropped for a missing title, start or bad data
    pub skipped: usize,
    /// Calendar-level colour (`X-APPLE-CALENDAR-COLOR` outside any VEVENT)
    pub color: Option<String>,
}

#[derive(Default)]
struct PendingEvent {
    title: Option<String>,
    start: Option<DateTime<Local>>,
    end: Option<DateTime<Local>>,
    all_day: bool,
    end_is_date: bool,
    color: Option<String>,
    recurrence_rule: Option<String>,
    exceptions: Vec<DateTime<Local>>,
}

impl PendingEvent {
    fn finish(self) -> Result<Event, String> {
        let title = self.title.filter(|t| !t.trim().is_empty()).ok_or("missing SUMMARY")?;
        let start = self.start.ok_or("missing DTSTART")?;

        let end = match self.end {
            Some(end) if self.end_is_date => inclusive_all_day_end(end).max(start),
            Some(end) => end,
            None => start,
        };

        let mut builder = Event::builder()
            .title(title)
            .start(start)
            .end(end)
            .all_day(self.all_day);
        if let Some(color) = self.color {
            builder = builder.color(color);
        }
        if let Some(rule) = self.recurrence_rule {
            builder = builder.recurrence_rule(rule);
        }
        if !self.exceptions.is_empty() {
            builder = builder.recurrence_exceptions(self.exceptions);
        }
        builder.build()
    }
}

pub(super) fn from_str(ics_content: &str) -> ParsedCalendar {
    let mut parsed = ParsedCalendar::default();
    let mut current: Option<PendingEvent> = None;

    for line in unfold_lines(ics_content) {
        let line = line.trim();

        if line == "BEGIN:VEVENT" {
            current = Some(PendingEvent::default());
        } else if line == "END:VEVENT" {
            let Some(pending) = current.take() else {
                continue;
            };
            match pending.finish() {
                Ok(event) => parsed.events.push(event),
                Err(reason) => {
                    log::warn!("Skipping VEVENT: {}", reason);
                    parsed.skipped += 1;
                }
            }
        } else if let Some(pending) = current.as_mut() {
            if let Err(e) = parse_event_property(line, pending) {
                log::warn!("Ignoring property '{}': {:#}", line, e);
            }
        } else if let Some(value) = line.strip_prefix("X-APPLE-CALENDAR-COLOR:") {
            parsed.color = normalize_color(value);
        }
    }

    if current.is_some() {
        log::warn!("Unterminated VEVENT at end of input");
        parsed.skipped += 1;
    }

    parsed
}

fn parse_event_property(line: &str, event: &mut PendingEvent) -> Result<()> {
    let Some((key_part, value)) = line.split_once(':') else {
        return Ok(());
    };
    let key = key_part.split(';').next().unwrap_or(key_part);

    match key {
        "SUMMARY" => event.title = Some(unescape_text(value)),
        "COLOR" | "X-APPLE-CALENDAR-COLOR" => {
            if let Some(color) = normalize_color(value) {
                event.color = Some(color);
            }
        }
        "DTSTART" => {
            let (start, is_date) = parse_instant(key_part, value)?;
            event.start = Some(start);
            event.all_day = is_date;
        }
        "DTEND" => {
            let (end, is_date) = parse_instant(key_part, value)?;
            event.end = Some(end);
            event.end_is_date = is_date;
        }
        "RRULE" => event.recurrence_rule = Some(value.to_string()),
        "EXDATE" => {
            for item in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                let (date, _) = parse_instant(key_part, item)?;
                event.exceptions.push(date);
            }
        }
        _ => {}
    }

    Ok(())
}
