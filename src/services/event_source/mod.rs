//! Where the widget gets its events from.
//!
//! Source selection (which calendars count) and the access check both live
//! here, so the grid builder only ever sees a plain list of events.

use anyhow::Result;
use chrono::{DateTime, Local};
use std::collections::HashMap;

use crate::models::access::AccessStatus;
use crate::models::event::Event;
use crate::services::calendar::CalendarService;
use crate::services::database::Database;
use crate::services::event::EventService;

/// Supplies events overlapping a time range, recurring events expanded.
#[cfg_attr(test, mockall::automock)]
pub trait EventSource {
    fn events_in_range(&self, start: DateTime<Local>, end: DateTime<Local>)
        -> Result<Vec<Event>>;
}

/// Events from the local store, limited to visible calendars.
pub struct StoreEventSource<'a> {
    db: &'a Database,
}

impl<'a> StoreEventSource<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }
}

impl<'a> EventSource for StoreEventSource<'a> {
    fn events_in_range(
        &self,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Vec<Event>> {
        let calendars = CalendarService::new(self.db.connection()).list_visible()?;
        let visible: Vec<i64> = calendars.iter().filter_map(|calendar| calendar.id).collect();
        let colors: HashMap<i64, String> = calendars
            .into_iter()
            .filter_map(|calendar| Some((calendar.id?, calendar.color?)))
            .collect();

        let mut events = EventService::new(self.db.connection())
            .expand_recurring_events(start, end, Some(&visible))?;
        // Events without their own color take their calendar's.
        for event in events.iter_mut().filter(|event| event.color.is_none()) {
            event.color = event.calendar_id.and_then(|id| colors.get(&id).cloned());
        }
        Ok(events)
    }
}

/// Wraps a source and yields nothing unless access has been granted.
pub struct GatedEventSource<S> {
    inner: S,
    access: AccessStatus,
}

impl<S: EventSource> GatedEventSource<S> {
    pub fn new(inner: S, access: AccessStatus) -> Self {
        Self { inner, access }
    }

    pub fn access(&self) -> AccessStatus {
        self.access
    }
}

impl<S: EventSource> EventSource for GatedEventSource<S> {
    fn events_in_range(
        &self,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Vec<Event>> {
        if !self.access.is_granted() {
            log::debug!("Event access is {}, skipping event source", self.access);
            return Ok(Vec::new());
        }
        self.inner.events_in_range(start, end)
    }
}
