//! Calendar event service entry point.
//! Provides database-backed operations and recurrence expansion helpers
//! organized across focused submodules.

use rusqlite::Connection;

pub mod crud;
pub mod queries;
pub mod recurrence;
mod shared;

/// Service for managing calendar events stored in SQLite.
pub struct EventService<'a> {
    pub(crate) conn: &'a Connection,
}

impl<'a> EventService<'a> {
    /// Create a new EventService with a database connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}
