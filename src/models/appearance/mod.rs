// Appearance module
// Presentation words and markers, passed explicitly to rendering code

use serde::{Deserialize, Serialize};

/// Labels and markers used when presenting a widget snapshot.
///
/// This is a plain value: callers load it once and hand it to whatever
/// formats dates or draws the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    /// Label for an event starting today
    pub today_label: String,
    /// Label for an event starting tomorrow
    pub tomorrow_label: String,
    /// Prefix in front of the next event's day label
    pub next_prefix: String,
    /// Placed around day numbers from the neighbouring months
    pub faded_marker: char,
    /// Placed around today's day number
    pub today_marker: char,
    /// Placed after day numbers that have events
    pub event_marker: char,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            today_label: "Today".to_string(),
            tomorrow_label: "Tomorrow".to_string(),
            next_prefix: "Next:".to_string(),
            faded_marker: '.',
            today_marker: '*',
            event_marker: '+',
        }
    }
}

impl Appearance {
    pub fn validate(&self) -> Result<(), String> {
        if self.today_label.trim().is_empty() {
            return Err("Today label cannot be empty".to_string());
        }
        if self.tomorrow_label.trim().is_empty() {
            return Err("Tomorrow label cannot be empty".to_string());
        }
        Ok(())
    }
}
