use super::shared::{map_event_row, to_storage, EVENT_COLUMNS};
use super::EventService;
use crate::models::event::Event;
use anyhow::Result;
use chrono::{DateTime, Local};
use rusqlite::{self, params_from_iter, types::Value};

impl<'a> EventService<'a> {
    /// List every event ordered by start date.
    pub fn list_all(&self) -> Result<Vec<Event>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM events ORDER BY start_datetime ASC",
            EVENT_COLUMNS
        ))?;

        let events = stmt
            .query_map([], map_event_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(events)
    }

    /// Find events overlapping `[start, end]`, plus recurring events that
    /// began before `end` and may have occurrences inside the range.
    ///
    /// When `calendar_ids` is given only events of those calendars, plus
    /// local events that belong to no calendar, are returned.
    pub fn find_by_date_range(
        &self,
        start: DateTime<Local>,
        end: DateTime<Local>,
        calendar_ids: Option<&[i64]>,
    ) -> Result<Vec<Event>> {
        let mut sql = format!(
            "SELECT {} FROM events
             WHERE ((start_datetime <= ?1 AND end_datetime >= ?2)
                OR (recurrence_rule IS NOT NULL AND recurrence_rule != ''
                    AND recurrence_rule != 'None' AND start_datetime <= ?1))",
            EVENT_COLUMNS
        );
        let mut values = vec![Value::Text(to_storage(&end)), Value::Text(to_storage(&start))];

        match calendar_ids {
            Some([]) => sql.push_str(" AND calendar_id IS NULL"),
            Some(ids) => {
                let placeholders: Vec<String> =
                    (0..ids.len()).map(|i| format!("?{}", i + 3)).collect();
                sql.push_str(&format!(
                    " AND (calendar_id IS NULL OR calendar_id IN ({}))",
                    placeholders.join(", ")
                ));
                values.extend(ids.iter().map(|id| Value::Integer(*id)));
            }
            None => {}
        }
        sql.push_str(" ORDER BY start_datetime ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let events = stmt
            .query_map(params_from_iter(values), map_event_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(events)
    }
}
