//! Calendar service for the collections events belong to.
//!
//! Visibility rules (enabled, not subscribed) are applied here so that
//! callers further down never have to filter by source.

use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, Row};

use crate::models::calendar::Calendar;

/// Service for managing calendars stored in SQLite.
pub struct CalendarService<'a> {
    conn: &'a Connection,
}

impl<'a> CalendarService<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Create a new calendar.
    pub fn create(&self, calendar: Calendar) -> Result<Calendar> {
        calendar.validate().map_err(|e| anyhow!(e))?;

        self.conn
            .execute(
                "INSERT INTO calendars (name, color, is_subscribed, enabled)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    calendar.name.trim(),
                    calendar.color,
                    calendar.is_subscribed as i32,
                    calendar.enabled as i32,
                ],
            )
            .context("Failed to insert calendar")?;

        let id = self.conn.last_insert_rowid();
        log::info!("Created calendar '{}' ({})", calendar.name.trim(), id);
        self.get(id)?
            .ok_or_else(|| anyhow!("Calendar {} vanished after insert", id))
    }

    /// Get a calendar by ID.
    pub fn get(&self, id: i64) -> Result<Option<Calendar>> {
        let result = self.conn.query_row(
            "SELECT id, name, color, is_subscribed, enabled FROM calendars WHERE id = ?1",
            params![id],
            map_calendar_row,
        );

        match result {
            Ok(calendar) => Ok(Some(calendar)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get a calendar by its (unique) name.
    pub fn get_by_name(&self, name: &str) -> Result<Option<Calendar>> {
        let result = self.conn.query_row(
            "SELECT id, name, color, is_subscribed, enabled FROM calendars WHERE name = ?1",
            params![name.trim()],
            map_calendar_row,
        );

        match result {
            Ok(calendar) => Ok(Some(calendar)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Return the calendar with this name, creating it from `template` if missing.
    pub fn find_or_create(&self, template: Calendar) -> Result<Calendar> {
        if let Some(existing) = self.get_by_name(&template.name)? {
            return Ok(existing);
        }
        self.create(template)
    }

    /// List all calendars ordered by name.
    pub fn list_all(&self) -> Result<Vec<Calendar>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, color, is_subscribed, enabled FROM calendars ORDER BY name ASC",
        )?;

        let calendars = stmt
            .query_map([], map_calendar_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(calendars)
    }

    /// Calendars whose events the widget may show.
    pub fn list_visible(&self) -> Result<Vec<Calendar>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(Calendar::is_visible)
            .collect())
    }

    /// Enable or disable a calendar.
    pub fn set_enabled(&self, id: i64, enabled: bool) -> Result<()> {
        let rows_affected = self
            .conn
            .execute(
                "UPDATE calendars SET enabled = ?1 WHERE id = ?2",
                params![enabled as i32, id],
            )
            .context("Failed to update calendar")?;

        if rows_affected == 0 {
            return Err(anyhow!("Calendar with id {} not found", id));
        }

        Ok(())
    }

    /// Delete a calendar together with its events.
    pub fn delete(&self, id: i64) -> Result<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM calendars WHERE id = ?1", params![id])
            .context("Failed to delete calendar")?;

        if rows_affected == 0 {
            return Err(anyhow!("Calendar with id {} not found", id));
        }

        log::info!("Deleted calendar {}", id);
        Ok(())
    }
}

fn map_calendar_row(row: &Row<'_>) -> Result<Calendar, rusqlite::Error> {
    Ok(Calendar {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        color: row.get(2)?,
        is_subscribed: row.get::<_, i32>(3)? != 0,
        enabled: row.get::<_, i32>(4)? != 0,
    })
}
