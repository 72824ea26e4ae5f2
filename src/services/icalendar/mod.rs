//! RFC 5545 (.ics) import into the local event store.

pub mod import;
mod service;
mod utils;

pub use import::ParsedCalendar;
pub use service::{ICalendarService, ImportSummary};
