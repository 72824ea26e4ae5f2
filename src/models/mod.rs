// Module exports for models

pub mod access;
pub mod appearance;
pub mod calendar;
pub mod day_cell;
pub mod event;
pub mod settings;
pub mod week_start;

use thiserror::Error;

/// Errors raised when parsing model values from user or database input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown week start '{0}', expected 'sunday' or 'monday'")]
    UnknownWeekStart(String),
    #[error("unknown access status '{0}'")]
    UnknownAccessStatus(String),
}
