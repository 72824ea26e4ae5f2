use crate::models::settings::Settings;
use crate::services::database::Database;
use anyhow::{anyhow, Context, Result};

use super::mapper::row_to_settings;

pub struct SettingsService<'a> {
    db: &'a Database,
}

impl<'a> SettingsService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Get the current settings
    pub fn get(&self) -> Result<Settings> {
        let conn = self.db.connection();

        let settings = conn
            .query_row(
                "SELECT id, first_day_of_week, date_format, upcoming_window_days, event_access
                 FROM settings WHERE id = 1",
                [],
                row_to_settings,
            )
            .context("Failed to load settings")?;

        Ok(settings)
    }

    /// Update settings
    pub fn update(&self, settings: &Settings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        let conn = self.db.connection();

        conn.execute(
            "UPDATE settings \
             SET first_day_of_week = ?1, \
                 date_format = ?2, \
                 upcoming_window_days = ?3, \
                 event_access = ?4, \
                 updated_at = CURRENT_TIMESTAMP \
             WHERE id = 1",
            (
                settings.first_day_of_week.index(),
                &settings.date_format,
                settings.upcoming_window_days,
                settings.event_access.as_str(),
            ),
        )
        .context("Failed to update settings")?;

        log::debug!("Saved settings: {:?}", settings);
        Ok(())
    }

    /// Reset settings to defaults
    pub fn reset(&self) -> Result<()> {
        self.update(&Settings::default())
    }
}
