// Service module exports

pub mod access;
pub mod appearance;
pub mod calendar;
pub mod database;
pub mod event;
pub mod event_source;
pub mod icalendar;
pub mod month_grid;
pub mod settings;
pub mod timeline;
pub mod widget;
