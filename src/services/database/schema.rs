use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    create_settings_table(conn)?;
    run_settings_migrations(conn)?;
    insert_default_settings(conn)?;
    create_calendars_table(conn)?;
    create_events_table(conn)?;
    create_event_indexes(conn)?;
    Ok(())
}

fn create_settings_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            first_day_of_week INTEGER NOT NULL DEFAULT 2,
            date_format TEXT NOT NULL DEFAULT 'MM/DD/YYYY',
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create settings table")?;

    Ok(())
}

fn run_settings_migrations(conn: &Connection) -> Result<()> {
    migrations::ensure_column(
        conn,
        "settings",
        "upcoming_window_days",
        "ALTER TABLE settings ADD COLUMN upcoming_window_days INTEGER NOT NULL DEFAULT 7",
    )?;

    migrations::ensure_column(
        conn,
        "settings",
        "event_access",
        "ALTER TABLE settings ADD COLUMN event_access TEXT NOT NULL DEFAULT 'not_determined'",
    )?;

    Ok(())
}

fn insert_default_settings(conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO settings (id, first_day_of_week, date_format)
         VALUES (1, 2, 'MM/DD/YYYY')",
        [],
    )
    .context("Failed to insert default settings")?;

    Ok(())
}

fn create_calendars_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS calendars (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            color TEXT,
            is_subscribed INTEGER NOT NULL DEFAULT 0,
            enabled INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create calendars table")?;

    Ok(())
}

fn create_events_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            calendar_id INTEGER REFERENCES calendars(id) ON DELETE CASCADE,
            title TEXT NOT NULL,
            start_datetime TEXT NOT NULL,
            end_datetime TEXT NOT NULL,
            is_all_day INTEGER NOT NULL DEFAULT 0,
            color TEXT,
            recurrence_rule TEXT,
            recurrence_exceptions TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create events table")?;

    Ok(())
}

fn create_event_indexes(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_events_start ON events (start_datetime)",
        [],
    )
    .context("Failed to create events start index")?;

    Ok(())
}
