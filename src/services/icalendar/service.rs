use super::import::{self, ParsedCalendar};
use crate::models::calendar::Calendar;
use crate::services::calendar::CalendarService;
use crate::services::event::EventService;
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::fs;
use std::path::Path;

/// Outcome of importing one .ics document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub calendar: Calendar,
    pub imported: usize,
    pub skipped: usize,
}

/// Service for importing iCalendar (.ics) files into the event store
pub struct ICalendarService<'a> {
    conn: &'a Connection,
}

impl<'a> ICalendarService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse events without touching the store
    pub fn parse(ics_content: &str) -> ParsedCalendar {
        import::from_str(ics_content)
    }

    /// Import events into the calendar described by `target`, creating it if needed.
    ///
    /// A colour found in the document is used when a new calendar has none.
    /// All inserts happen in one transaction.
    pub fn import_str(&self, ics_content: &str, target: Calendar) -> Result<ImportSummary> {
        let parsed = Self::parse(ics_content);

        let tx = self.conn.unchecked_transaction()?;
        let template = Calendar {
            color: target.color.clone().or(parsed.color),
            ..target
        };
        let calendar = CalendarService::new(&tx).find_or_create(template)?;
        let calendar_id = calendar
            .id
            .context("Calendar has no id after find_or_create")?;

        let events = EventService::new(&tx);
        let mut imported = 0;
        for mut event in parsed.events {
            event.calendar_id = Some(calendar_id);
            events
                .create(event)
                .with_context(|| format!("Failed to import into '{}'", calendar.name))?;
            imported += 1;
        }
        tx.commit()?;

        log::info!(
            "Imported {} events into '{}' ({} skipped)",
            imported,
            calendar.name,
            parsed.skipped
        );
        Ok(ImportSummary {
            calendar,
            imported,
            skipped: parsed.skipped,
        })
    }

    /// Import events from a .ics file on disk
    pub fn import_file(&self, path: &Path, target: Calendar) -> Result<ImportSummary> {
        let content =
            fs::read_to_string(path).context(format!("Failed to read .ics file: {:?}", path))?;
        self.import_str(&content, target)
    }
}
