use chrono::{DateTime, Local, SecondsFormat, Utc};
use rusqlite::{self, Result, Row};

use crate::models::event::Event;

pub(crate) const EVENT_COLUMNS: &str = "id, calendar_id, title, start_datetime, end_datetime, \
     is_all_day, color, recurrence_rule, recurrence_exceptions";

/// Instants are stored as UTC RFC 3339 with a fixed nine-digit fraction, so
/// text comparison follows time order and sub-second precision survives.
pub(crate) fn to_storage(dt: &DateTime<Local>) -> String {
    dt.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn to_local_datetime(value: String) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

pub(crate) fn serialize_exceptions(exceptions: Option<&Vec<DateTime<Local>>>) -> Option<String> {
    exceptions.map(|dates| {
        let serialized: Vec<String> = dates.iter().map(to_storage).collect();
        serde_json::to_string(&serialized).unwrap_or_default()
    })
}

pub(crate) fn deserialize_exceptions(json: Option<String>) -> Result<Option<Vec<DateTime<Local>>>> {
    let Some(json) = json else {
        return Ok(None);
    };

    let dates: Vec<String> = serde_json::from_str(&json)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let parsed = dates
        .into_iter()
        .filter_map(|value| DateTime::parse_from_rfc3339(&value).ok())
        .map(|dt| dt.with_timezone(&Local))
        .collect();

    Ok(Some(parsed))
}

pub(crate) fn map_event_row(row: &Row<'_>) -> Result<Event> {
    Ok(Event {
        id: Some(row.get(0)?),
        calendar_id: row.get(1)?,
        title: row.get(2)?,
        start: to_local_datetime(row.get(3)?)?,
        end: to_local_datetime(row.get(4)?)?,
        all_day: row.get::<_, i32>(5)? != 0,
        color: row.get(6)?,
        recurrence_rule: row.get(7)?,
        recurrence_exceptions: deserialize_exceptions(row.get(8)?)?,
    })
}
