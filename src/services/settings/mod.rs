//! Persistent widget settings stored in the single `settings` row.

mod mapper;
mod service;

pub use service::SettingsService;
