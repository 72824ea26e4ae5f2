use crate::models::access::AccessStatus;
use crate::models::settings::Settings;
use crate::models::week_start::WeekStart;
use rusqlite::types::Type;
use rusqlite::Row;

pub fn row_to_settings(row: &Row) -> Result<Settings, rusqlite::Error> {
    let first_day_index: u32 = row.get(1)?;
    // Unknown indices fall back to the default rather than failing the load
    let first_day_of_week = WeekStart::from_index(first_day_index).unwrap_or_default();

    let access: String = row.get(4)?;
    let event_access = access
        .parse::<AccessStatus>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(Settings {
        id: Some(row.get(0)?),
        first_day_of_week,
        date_format: row.get(2)?,
        upcoming_window_days: row.get(3)?,
        event_access,
    })
}
