use super::shared::{map_event_row, serialize_exceptions, to_storage, EVENT_COLUMNS};
use super::EventService;
use crate::models::event::Event;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local};
use rusqlite::{self, params};

impl<'a> EventService<'a> {
    /// Create a new event in the database.
    pub fn create(&self, mut event: Event) -> Result<Event> {
        event.validate().map_err(|e| anyhow!(e))?;

        let exceptions_json = serialize_exceptions(event.recurrence_exceptions.as_ref());

        self.conn
            .execute(
                "INSERT INTO events (
                    calendar_id, title, start_datetime, end_datetime, is_all_day,
                    color, recurrence_rule, recurrence_exceptions
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    event.calendar_id,
                    event.title,
                    to_storage(&event.start),
                    to_storage(&event.end),
                    event.all_day as i32,
                    event.color,
                    event.recurrence_rule,
                    exceptions_json,
                ],
            )
            .context("Failed to insert event")?;

        event.id = Some(self.conn.last_insert_rowid());
        log::debug!("Created event {:?} '{}'", event.id, event.title);
        Ok(event)
    }

    /// Retrieve an event by ID.
    pub fn get(&self, id: i64) -> Result<Option<Event>> {
        let result = self.conn.query_row(
            &format!("SELECT {} FROM events WHERE id = ?", EVENT_COLUMNS),
            [id],
            map_event_row,
        );

        match result {
            Ok(event) => Ok(Some(event)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Update an existing event.
    pub fn update(&self, event: &Event) -> Result<()> {
        let id = event
            .id
            .ok_or_else(|| anyhow!("Event ID is required for update"))?;
        event.validate().map_err(|e| anyhow!(e))?;

        let exceptions_json = serialize_exceptions(event.recurrence_exceptions.as_ref());
        let rows_affected = self
            .conn
            .execute(
                "UPDATE events SET
                    calendar_id = ?, title = ?, start_datetime = ?, end_datetime = ?,
                    is_all_day = ?, color = ?, recurrence_rule = ?,
                    recurrence_exceptions = ?, updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?",
                params![
                    event.calendar_id,
                    event.title,
                    to_storage(&event.start),
                    to_storage(&event.end),
                    event.all_day as i32,
                    event.color,
                    event.recurrence_rule,
                    exceptions_json,
                    id,
                ],
            )
            .context("Failed to update event")?;

        if rows_affected == 0 {
            return Err(anyhow!("Event with id {} not found", id));
        }

        Ok(())
    }

    /// Delete an event by ID.
    pub fn delete(&self, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM events WHERE id = ?", [id])
            .context("Failed to delete event")?;

        if rows_affected == 0 {
            return Err(anyhow!("Event with id {} not found", id));
        }

        Ok(())
    }

    /// Skip a single occurrence of a recurring event.
    pub fn delete_occurrence(&self, id: i64, occurrence: DateTime<Local>) -> Result<()> {
        let mut event = self
            .get(id)?
            .ok_or_else(|| anyhow!("Event with id {} not found", id))?;

        if !event.is_recurring() {
            return Err(anyhow!("Event is not recurring, use delete() instead"));
        }

        let mut exceptions = event.recurrence_exceptions.take().unwrap_or_default();
        if !exceptions
            .iter()
            .any(|ex| ex.date_naive() == occurrence.date_naive())
        {
            exceptions.push(occurrence);
        }
        event.recurrence_exceptions = Some(exceptions);
        self.update(&event)
    }
}
